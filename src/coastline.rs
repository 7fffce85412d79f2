//! Coastline polylines for polar maps
//!
//! Coastlines are read from a plain-text multi-segment file: one `lon lat`
//! pair per line, with segments separated by blank lines or lines starting
//! with `>`. Lines starting with `#` are comments.

use crate::errors::{Result, RuNeDiagError};
use std::fs;
use std::path::Path;

/// A set of coastline polylines in geographic coordinates
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Coastlines {
    pub segments: Vec<Vec<(f64, f64)>>,
}

impl Coastlines {
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut current: Vec<(f64, f64)> = Vec::new();

        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.starts_with('#') {
                continue;
            }
            if line.is_empty() || line.starts_with('>') {
                if current.len() > 1 {
                    segments.push(std::mem::take(&mut current));
                } else {
                    current.clear();
                }
                continue;
            }

            let mut parts = line.split_whitespace().map(str::parse::<f64>);
            match (parts.next(), parts.next()) {
                (Some(Ok(lon)), Some(Ok(lat))) => current.push((lon, lat)),
                _ => {
                    return Err(RuNeDiagError::InvalidParameter {
                        name: "coastline_file".to_string(),
                        message: format!("line {}: expected 'lon lat'", line_no + 1),
                    })
                }
            }
        }
        if current.len() > 1 {
            segments.push(current);
        }

        Ok(Self { segments })
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}
