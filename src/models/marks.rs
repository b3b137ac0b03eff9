use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::models::catalog::ML_FEATURES;

/// Subject name -> entered mark, for one submission
///
/// Keys are exactly the selected subjects and keep the order they were
/// entered in (catalog order), also on the wire as a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarksMap(Vec<(String, i64)>);

impl MarksMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a mark; an existing subject keeps its position
    pub fn insert(&mut self, subject: impl Into<String>, mark: i64) {
        let subject = subject.into();
        match self.0.iter_mut().find(|(s, _)| *s == subject) {
            Some(entry) => entry.1 = mark,
            None => self.0.push((subject, mark)),
        }
    }

    pub fn get(&self, subject: &str) -> Option<i64> {
        self.0.iter().find(|(s, _)| s == subject).map(|(_, m)| *m)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn subjects(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(s, _)| s.as_str())
    }

    /// Marks for [`ML_FEATURES`], in that order; 0 for any feature not entered
    pub fn feature_vector(&self) -> Vec<i64> {
        ML_FEATURES
            .iter()
            .map(|feature| self.get(feature).unwrap_or(0))
            .collect()
    }
}

impl FromIterator<(String, i64)> for MarksMap {
    fn from_iter<T: IntoIterator<Item = (String, i64)>>(iter: T) -> Self {
        let mut marks = Self::new();
        for (subject, mark) in iter {
            marks.insert(subject, mark);
        }
        marks
    }
}

impl Serialize for MarksMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (subject, mark) in &self.0 {
            map.serialize_entry(subject, mark)?;
        }
        map.end()
    }
}

struct MarksVisitor;

impl<'de> Visitor<'de> for MarksVisitor {
    type Value = MarksMap;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object of subject -> integer mark")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<MarksMap, A::Error> {
        let mut marks = MarksMap::new();
        while let Some((subject, mark)) = access.next_entry::<String, i64>()? {
            marks.insert(subject, mark);
        }
        Ok(marks)
    }
}

impl<'de> Deserialize<'de> for MarksMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(MarksVisitor)
    }
}

/// Parses a mark input the way a number field is read: leading whitespace,
/// optional sign, then leading digits. Blank or non-numeric input is 0.
/// The 0-100 range is only a hint and is not enforced here.
pub fn parse_mark(raw: &str) -> i64 {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return 0;
    }

    match digits[..end].parse::<i64>() {
        Ok(value) if negative => -value,
        Ok(value) => value,
        Err(_) => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mark_reads_integer_prefix() {
        assert_eq!(parse_mark("85"), 85);
        assert_eq!(parse_mark("  42"), 42);
        assert_eq!(parse_mark("77.9"), 77);
        assert_eq!(parse_mark("90abc"), 90);
        assert_eq!(parse_mark("+12"), 12);
        assert_eq!(parse_mark("-5"), -5);
    }

    #[test]
    fn test_parse_mark_falls_back_to_zero() {
        assert_eq!(parse_mark(""), 0);
        assert_eq!(parse_mark("   "), 0);
        assert_eq!(parse_mark("abc"), 0);
        assert_eq!(parse_mark("-"), 0);
        assert_eq!(parse_mark("99999999999999999999999"), 0);
    }

    #[test]
    fn test_feature_vector_has_fixed_shape() {
        let marks: MarksMap = [("ML".to_string(), 80), ("Stats".to_string(), 70)]
            .into_iter()
            .collect();
        assert_eq!(marks.feature_vector(), vec![0, 80, 0, 0, 70]);
    }

    #[test]
    fn test_serializes_in_entry_order() {
        let mut marks: MarksMap = [("ML".to_string(), 80), ("DSA".to_string(), 90)]
            .into_iter()
            .collect();
        marks.insert("ML", 85);
        assert_eq!(serde_json::to_string(&marks).unwrap(), r#"{"ML":85,"DSA":90}"#);

        let back: MarksMap = serde_json::from_str(r#"{"Stats":1,"C":2}"#).unwrap();
        assert_eq!(back.subjects().collect::<Vec<_>>(), vec!["Stats", "C"]);
    }

    #[test]
    fn test_feature_vector_all_zero_without_overlap() {
        let marks: MarksMap = [("Robotics".to_string(), 95), ("Kinematics".to_string(), 60)]
            .into_iter()
            .collect();
        let vector = marks.feature_vector();
        assert_eq!(vector.len(), ML_FEATURES.len());
        assert!(vector.iter().all(|&m| m == 0));

        assert_eq!(MarksMap::new().feature_vector(), vec![0; 5]);
    }
}
