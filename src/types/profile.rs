// src/types/profile.rs
//! Candidate profile as edited section by section

use serde::{Deserialize, Deserializer, Serialize};

// ===== Profile =====

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub linkedin: Option<String>,
    pub target_role: Option<String>,
    pub experience_level: Option<ExperienceLevel>,
    pub availability: Option<String>,
    pub education: Vec<Education>,
    pub experiences: Vec<Experience>,
    pub languages: Vec<Language>,
    #[serde(rename = "hardSkills")]
    pub hard_skills: Vec<String>,
    #[serde(rename = "softSkills")]
    pub soft_skills: Vec<String>,
    pub interests: Vec<String>,
    pub activities: Vec<String>,
    pub projects: Vec<Project>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Junior,
    Intermediate,
    Senior,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Education {
    pub school: String,
    pub degree: String,
    pub location: String,
    #[serde(rename = "startDate")]
    pub start_date: String,
    #[serde(rename = "endDate")]
    pub end_date: String,
    pub details: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Experience {
    pub company: String,
    pub role: String,
    pub location: String,
    #[serde(rename = "startDate")]
    pub start_date: String,
    #[serde(rename = "endDate")]
    pub end_date: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Language {
    pub name: String,
    pub level: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub name: String,
    pub role: String,
    pub description: String,
    pub skills: String,
}

// ===== Entry fields addressable by the section editors =====

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EducationField {
    School,
    Degree,
    Location,
    StartDate,
    EndDate,
    Details,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExperienceField {
    Company,
    Role,
    Location,
    StartDate,
    EndDate,
    Description,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageField {
    Name,
    Level,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectField {
    Name,
    Role,
    Description,
    Skills,
}

impl Education {
    pub fn set(&mut self, field: EducationField, value: String) {
        match field {
            EducationField::School => self.school = value,
            EducationField::Degree => self.degree = value,
            EducationField::Location => self.location = value,
            EducationField::StartDate => self.start_date = value,
            EducationField::EndDate => self.end_date = value,
            EducationField::Details => self.details = value,
        }
    }
}

impl Experience {
    pub fn set(&mut self, field: ExperienceField, value: String) {
        match field {
            ExperienceField::Company => self.company = value,
            ExperienceField::Role => self.role = value,
            ExperienceField::Location => self.location = value,
            ExperienceField::StartDate => self.start_date = value,
            ExperienceField::EndDate => self.end_date = value,
            ExperienceField::Description => self.description = value,
        }
    }
}

impl Language {
    pub fn set(&mut self, field: LanguageField, value: String) {
        match field {
            LanguageField::Name => self.name = value,
            LanguageField::Level => self.level = value,
        }
    }
}

impl Project {
    pub fn set(&mut self, field: ProjectField, value: String) {
        match field {
            ProjectField::Name => self.name = value,
            ProjectField::Role => self.role = value,
            ProjectField::Description => self.description = value,
            ProjectField::Skills => self.skills = value,
        }
    }
}

// ===== Section editing =====

fn remove_at<T>(items: &mut Vec<T>, index: usize) -> bool {
    if index < items.len() {
        items.remove(index);
        true
    } else {
        false
    }
}

fn push_trimmed(items: &mut Vec<String>, value: &str) -> bool {
    let value = value.trim();
    if value.is_empty() {
        return false;
    }
    items.push(value.to_string());
    true
}

impl Profile {
    pub fn add_education(&mut self) {
        self.education.push(Education::default());
    }

    pub fn remove_education(&mut self, index: usize) -> bool {
        remove_at(&mut self.education, index)
    }

    pub fn update_education(&mut self, index: usize, field: EducationField, value: String) -> bool {
        match self.education.get_mut(index) {
            Some(entry) => {
                entry.set(field, value);
                true
            }
            None => false,
        }
    }

    pub fn add_experience(&mut self) {
        self.experiences.push(Experience::default());
    }

    pub fn remove_experience(&mut self, index: usize) -> bool {
        remove_at(&mut self.experiences, index)
    }

    pub fn update_experience(
        &mut self,
        index: usize,
        field: ExperienceField,
        value: String,
    ) -> bool {
        match self.experiences.get_mut(index) {
            Some(entry) => {
                entry.set(field, value);
                true
            }
            None => false,
        }
    }

    pub fn add_project(&mut self) {
        self.projects.push(Project::default());
    }

    pub fn remove_project(&mut self, index: usize) -> bool {
        remove_at(&mut self.projects, index)
    }

    pub fn update_project(&mut self, index: usize, field: ProjectField, value: String) -> bool {
        match self.projects.get_mut(index) {
            Some(entry) => {
                entry.set(field, value);
                true
            }
            None => false,
        }
    }

    /// Both name and level are required before a language is kept.
    pub fn add_language(&mut self, name: &str, level: &str) -> bool {
        if name.is_empty() || level.is_empty() {
            return false;
        }
        self.languages.push(Language {
            name: name.to_string(),
            level: level.to_string(),
        });
        true
    }

    pub fn remove_language(&mut self, index: usize) -> bool {
        remove_at(&mut self.languages, index)
    }

    pub fn update_language(&mut self, index: usize, field: LanguageField, value: String) -> bool {
        match self.languages.get_mut(index) {
            Some(entry) => {
                entry.set(field, value);
                true
            }
            None => false,
        }
    }

    pub fn add_hard_skill(&mut self, skill: &str) -> bool {
        push_trimmed(&mut self.hard_skills, skill)
    }

    pub fn remove_hard_skill(&mut self, index: usize) -> bool {
        remove_at(&mut self.hard_skills, index)
    }

    pub fn add_soft_skill(&mut self, skill: &str) -> bool {
        push_trimmed(&mut self.soft_skills, skill)
    }

    pub fn remove_soft_skill(&mut self, index: usize) -> bool {
        remove_at(&mut self.soft_skills, index)
    }

    pub fn add_interest(&mut self, interest: &str) -> bool {
        push_trimmed(&mut self.interests, interest)
    }

    pub fn remove_interest(&mut self, index: usize) -> bool {
        remove_at(&mut self.interests, index)
    }

    pub fn add_activity(&mut self, activity: &str) -> bool {
        push_trimmed(&mut self.activities, activity)
    }

    pub fn remove_activity(&mut self, index: usize) -> bool {
        remove_at(&mut self.activities, index)
    }

    /// Apply a partial update: every field present in the patch replaces ours.
    pub fn apply(&mut self, update: ProfileUpdate) {
        let ProfileUpdate {
            first_name,
            last_name,
            email,
            phone,
            city,
            linkedin,
            target_role,
            experience_level,
            availability,
            education,
            experiences,
            languages,
            hard_skills,
            soft_skills,
            interests,
            activities,
            projects,
        } = update;

        if let Some(v) = first_name {
            self.first_name = Some(v);
        }
        if let Some(v) = last_name {
            self.last_name = Some(v);
        }
        if let Some(v) = email {
            self.email = Some(v);
        }
        if let Some(v) = phone {
            self.phone = Some(v);
        }
        if let Some(v) = city {
            self.city = Some(v);
        }
        if let Some(v) = linkedin {
            self.linkedin = Some(v);
        }
        if let Some(v) = target_role {
            self.target_role = Some(v);
        }
        if let Some(v) = experience_level {
            self.experience_level = v;
        }
        if let Some(v) = availability {
            self.availability = Some(v);
        }
        if let Some(v) = education {
            self.education = v;
        }
        if let Some(v) = experiences {
            self.experiences = v;
        }
        if let Some(v) = languages {
            self.languages = v;
        }
        if let Some(v) = hard_skills {
            self.hard_skills = v;
        }
        if let Some(v) = soft_skills {
            self.soft_skills = v;
        }
        if let Some(v) = interests {
            self.interests = v;
        }
        if let Some(v) = activities {
            self.activities = v;
        }
        if let Some(v) = projects {
            self.projects = v;
        }
    }
}

// ===== Partial update =====

/// Distinguishes an absent key (`None`) from an explicit `null` (`Some(None)`).
fn explicit_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub linkedin: Option<String>,
    pub target_role: Option<String>,
    #[serde(deserialize_with = "explicit_null")]
    pub experience_level: Option<Option<ExperienceLevel>>,
    pub availability: Option<String>,
    pub education: Option<Vec<Education>>,
    pub experiences: Option<Vec<Experience>>,
    pub languages: Option<Vec<Language>>,
    #[serde(rename = "hardSkills")]
    pub hard_skills: Option<Vec<String>>,
    #[serde(rename = "softSkills")]
    pub soft_skills: Option<Vec<String>>,
    pub interests: Option<Vec<String>>,
    pub activities: Option<Vec<String>>,
    pub projects: Option<Vec<Project>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_partial_update_only_touches_present_fields() {
        let mut profile = Profile {
            first_name: Some("Lina".to_string()),
            city: Some("Lyon".to_string()),
            hard_skills: vec!["Rust".to_string()],
            ..Default::default()
        };

        let update: ProfileUpdate =
            serde_json::from_value(json!({ "city": "Nantes", "softSkills": ["Écoute"] })).unwrap();
        profile.apply(update);

        assert_eq!(profile.first_name.as_deref(), Some("Lina"));
        assert_eq!(profile.city.as_deref(), Some("Nantes"));
        assert_eq!(profile.hard_skills, vec!["Rust"]);
        assert_eq!(profile.soft_skills, vec!["Écoute"]);
    }

    #[test]
    fn test_experience_level_null_clears_it() {
        let mut profile = Profile {
            experience_level: Some(ExperienceLevel::Senior),
            ..Default::default()
        };

        let untouched: ProfileUpdate = serde_json::from_value(json!({ "city": "Paris" })).unwrap();
        profile.apply(untouched);
        assert_eq!(profile.experience_level, Some(ExperienceLevel::Senior));

        let cleared: ProfileUpdate =
            serde_json::from_value(json!({ "experience_level": null })).unwrap();
        assert_eq!(cleared.experience_level, Some(None));
        profile.apply(cleared);
        assert_eq!(profile.experience_level, None);
    }

    #[test]
    fn test_entry_editing() {
        let mut profile = Profile::default();
        profile.add_experience();
        profile.add_experience();
        assert!(profile.update_experience(1, ExperienceField::Company, "Acme".to_string()));
        assert!(!profile.update_experience(5, ExperienceField::Role, "CTO".to_string()));
        assert!(profile.remove_experience(0));
        assert!(!profile.remove_experience(3));

        assert_eq!(profile.experiences.len(), 1);
        assert_eq!(profile.experiences[0].company, "Acme");
    }

    #[test]
    fn test_string_lists_ignore_blank_input() {
        let mut profile = Profile::default();
        assert!(profile.add_interest("  escalade "));
        assert!(!profile.add_interest("   "));
        assert!(profile.add_hard_skill("SQL"));
        assert!(!profile.add_soft_skill(""));

        assert_eq!(profile.interests, vec!["escalade"]);
        assert_eq!(profile.hard_skills, vec!["SQL"]);
        assert!(profile.soft_skills.is_empty());
    }

    #[test]
    fn test_language_needs_name_and_level() {
        let mut profile = Profile::default();
        assert!(!profile.add_language("Anglais", ""));
        assert!(profile.add_language("Anglais", "C1"));
        assert!(profile.update_language(0, LanguageField::Level, "C2".to_string()));
        assert_eq!(profile.languages[0].level, "C2");
    }

    #[test]
    fn test_profile_wire_names() {
        let mut profile = Profile::default();
        profile.add_education();
        profile.update_education(0, EducationField::StartDate, "2019".to_string());
        let value = serde_json::to_value(&profile).unwrap();

        assert_eq!(value["education"][0]["startDate"], json!("2019"));
        assert!(value.get("hardSkills").is_some());
        assert!(value.get("softSkills").is_some());
    }
}
