//! Subject catalog
//!
//! Which subjects a student can pick, per academic branch or as one flat
//! list, plus the fixed subject order the prediction service reads marks in.

use phf::phf_ordered_map;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Subjects whose marks form the prediction feature vector, in wire order.
///
/// The prediction service reads `marks` positionally; never reorder.
pub const ML_FEATURES: [&str; 5] = ["DSA", "ML", "DBMS", "Python", "Stats"];

const CSE_SUBJECTS: &[&str] = &[
    "DSA",
    "ML",
    "DL",
    "DBMS",
    "DS",
    "OOP",
    "Stats",
    "C",
    "C++",
    "Java",
    "Python",
    "SQL",
    "Node.js",
    "AIML Advanced",
    "HTML",
    "CSS",
    "Cloud Computing",
    "Cyber Security",
];

const ECE_SUBJECTS: &[&str] = &[
    "VLSI Design",
    "Embedded Systems",
    "Signal Processing",
    "Microprocessors",
    "Digital Electronics",
    "Control Systems",
    "Circuit Theory",
    "IoT",
    "Antenna Theory",
    "Communication Systems",
    "Analog Circuits",
    "Fiber Optics",
];

const MECH_SUBJECTS: &[&str] = &[
    "Thermodynamics",
    "Fluid Mechanics",
    "CAD/CAM",
    "Robotics",
    "Heat Transfer",
    "Manufacturing Process",
    "Mechatronics",
    "Automobile Engineering",
    "Solid Mechanics",
    "Industrial Engineering",
    "Refrigeration",
    "Kinematics",
];

/// Built-in branch catalog, in display order
pub static BRANCH_SUBJECTS: phf::OrderedMap<&'static str, &'static [&'static str]> = phf_ordered_map! {
    "CSE" => CSE_SUBJECTS,
    "ECE" => ECE_SUBJECTS,
    "MECH" => MECH_SUBJECTS,
};

/// Built-in list for the single-catalog questionnaire (no branch step)
pub const FLAT_SUBJECTS: &[&str] = &[
    "DSA", "ML", "DBMS", "Python", "Stats", "OOP", "HTML", "CSS", "Node.js", "SQL", "Java", "C++",
];

/// Whether the questionnaire asks for a branch first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogMode {
    #[default]
    Branched,
    Flat,
}

impl FromStr for CatalogMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "branched" | "branch" | "branches" => Ok(CatalogMode::Branched),
            "flat" | "single" => Ok(CatalogMode::Flat),
            other => Err(format!("unknown catalog mode '{}'", other)),
        }
    }
}

/// One academic branch and the subjects it offers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchEntry {
    pub name: String,
    pub subjects: Vec<String>,
}

/// Subject catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Catalog {
    /// Subjects grouped by branch; a branch must be chosen first
    Branched(Vec<BranchEntry>),
    /// One subject list for everybody
    Flat(Vec<String>),
}

impl Catalog {
    /// Built-in catalog for the given mode
    pub fn builtin(mode: CatalogMode) -> Self {
        match mode {
            CatalogMode::Branched => Catalog::Branched(
                BRANCH_SUBJECTS
                    .entries()
                    .map(|(name, subjects)| BranchEntry {
                        name: name.to_string(),
                        subjects: subjects.iter().map(|s| s.to_string()).collect(),
                    })
                    .collect(),
            ),
            CatalogMode::Flat => {
                Catalog::Flat(FLAT_SUBJECTS.iter().map(|s| s.to_string()).collect())
            }
        }
    }

    pub fn has_branches(&self) -> bool {
        matches!(self, Catalog::Branched(_))
    }

    /// Branch labels in catalog order (empty for a flat catalog)
    pub fn branch_names(&self) -> Vec<&str> {
        match self {
            Catalog::Branched(branches) => branches.iter().map(|b| b.name.as_str()).collect(),
            Catalog::Flat(_) => Vec::new(),
        }
    }

    /// Subjects offered by a branch; exact label match
    pub fn subjects_for(&self, branch: &str) -> Option<&[String]> {
        match self {
            Catalog::Branched(branches) => branches
                .iter()
                .find(|b| b.name == branch)
                .map(|b| b.subjects.as_slice()),
            Catalog::Flat(_) => None,
        }
    }

    /// Subjects of a flat catalog
    pub fn subjects(&self) -> Option<&[String]> {
        match self {
            Catalog::Flat(subjects) => Some(subjects.as_slice()),
            Catalog::Branched(_) => None,
        }
    }

    /// Finds a branch label, ignoring case and surrounding whitespace
    pub fn find_branch(&self, input: &str) -> Option<&str> {
        let wanted = input.trim();
        self.branch_names()
            .into_iter()
            .find(|name| name.eq_ignore_ascii_case(wanted))
    }
}
