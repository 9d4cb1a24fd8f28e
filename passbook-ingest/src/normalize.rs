//! Description cleanup: drop card-network boilerplate and embedded dates.

use regex::Regex;

use crate::error::Result;

pub struct DescriptionNormalizer {
    noise: Vec<String>,
    date_fragments: Vec<Regex>,
}

impl DescriptionNormalizer {
    /// `noise` substrings are removed literally, one after another, in the given order.
    pub fn new(noise: &[String]) -> Result<Self> {
        let date_fragments = [
            r"\b\d{2}-\d{2}-\d{2}\b",
            r"\b\d{2}/\d{2}/\d{2}\b",
            r"\b\d{6}\b",
            r"\b\d{2}\.\d{2}\.\d{2}\b",
        ]
        .iter()
        .map(|p| Regex::new(p))
        .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self {
            noise: noise.iter().filter(|w| !w.is_empty()).cloned().collect(),
            date_fragments,
        })
    }

    pub fn normalize(&self, raw: &str) -> String {
        let mut detail = raw.to_string();
        for word in &self.noise {
            detail = detail.replace(word.as_str(), "");
        }
        for re in &self.date_fragments {
            detail = re.replace_all(&detail, "").into_owned();
        }
        detail.trim().to_string()
    }
}
