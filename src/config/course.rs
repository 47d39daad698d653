use crate::domain::model::DEFAULT_CAPACITY_PER_CELL;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_range, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Course-level settings, loadable from a TOML file. Everything has a default
/// so the tool works with no config file at all. The 5x5 topology itself is
/// fixed and deliberately not configurable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseConfig {
    #[serde(default)]
    pub course: CourseSection,
    #[serde(default)]
    pub grouping: GroupingSection,
    #[serde(default)]
    pub registration: RegistrationSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseSection {
    pub title: String,
    pub lecturer: String,
    pub department: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupingSection {
    pub capacity_per_cell: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationSection {
    pub code_prefix: String,
    pub code_digits: usize,
}

impl Default for CourseSection {
    fn default() -> Self {
        Self {
            title: "Renewable Energy Systems".to_string(),
            lecturer: "Mr. Efah Frank".to_string(),
            department: "Department of Electrical and Electronics Engineering".to_string(),
        }
    }
}

impl Default for GroupingSection {
    fn default() -> Self {
        Self {
            capacity_per_cell: DEFAULT_CAPACITY_PER_CELL,
        }
    }
}

impl Default for RegistrationSection {
    fn default() -> Self {
        Self {
            code_prefix: "EE".to_string(),
            code_digits: 7,
        }
    }
}

impl Default for CourseConfig {
    fn default() -> Self {
        Self {
            course: CourseSection::default(),
            grouping: GroupingSection::default(),
            registration: RegistrationSection::default(),
        }
    }
}

impl CourseConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: CourseConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }
}

impl Validate for CourseConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("course.title", &self.course.title)?;
        validate_non_empty_string("course.lecturer", &self.course.lecturer)?;
        validate_non_empty_string("course.department", &self.course.department)?;
        validate_range(
            "grouping.capacity_per_cell",
            self.grouping.capacity_per_cell,
            1,
            64,
        )?;
        validate_range("registration.code_digits", self.registration.code_digits, 1, 12)?;
        Ok(())
    }
}

impl ConfigProvider for CourseConfig {
    fn capacity_per_cell(&self) -> usize {
        self.grouping.capacity_per_cell
    }

    fn code_prefix(&self) -> &str {
        &self.registration.code_prefix
    }

    fn code_digits(&self) -> usize {
        self.registration.code_digits
    }

    fn course_title(&self) -> &str {
        &self.course.title
    }

    fn lecturer(&self) -> &str {
        &self.course.lecturer
    }

    fn department(&self) -> &str {
        &self.course.department
    }
}
