use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmploymentType {
    #[default]
    Regular,
    Contract,
    PartTime,
    Freelance,
}

impl EmploymentType {
    pub fn all() -> &'static [EmploymentType] {
        &[
            EmploymentType::Regular,
            EmploymentType::Contract,
            EmploymentType::PartTime,
            EmploymentType::Freelance,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Regular => "regular",
            Self::Contract => "contract",
            Self::PartTime => "part-time",
            Self::Freelance => "freelance",
        }
    }

    /// Parses the kebab-case code, ignoring ASCII case and surrounding whitespace.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::all()
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
    }

    /// Short label used in scenario titles.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Regular => "Regular",
            Self::Contract => "Contract",
            Self::PartTime => "Part-time",
            Self::Freelance => "Freelance",
        }
    }

    pub fn to_long_str(&self) -> &'static str {
        match self {
            Self::Regular => "Regular Employee (正社員)",
            Self::Contract => "Contract Employee (契約社員)",
            Self::PartTime => "Part-time (パート)",
            Self::Freelance => "Freelance (個人事業主)",
        }
    }

    /// Employees are enrolled in employer health and welfare pension schemes;
    /// freelancers pay national health insurance and the national pension.
    pub fn is_employee(&self) -> bool {
        !matches!(self, Self::Freelance)
    }
}

impl fmt::Display for EmploymentType {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
