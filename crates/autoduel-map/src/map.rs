//! Wall-descriptor map format.
//!
//! A map is a JSON array of `{ "x", "y", "width", "height" }` objects.
//! Integer and float coordinates are both accepted.

use std::path::Path;

use serde::{Deserialize, Serialize};

use autoduel_core::types::Rect;

use crate::error::MapError;

/// One static wall as stored in a map file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallDescriptor {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl WallDescriptor {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    fn validate(&self, index: usize) -> Result<(), MapError> {
        let fields = [self.x, self.y, self.width, self.height];
        if fields.iter().any(|v| !v.is_finite()) {
            return Err(MapError::InvalidWall {
                index,
                reason: "coordinates must be finite".into(),
            });
        }
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(MapError::InvalidWall {
                index,
                reason: format!(
                    "size must be positive, got {}x{}",
                    self.width, self.height
                ),
            });
        }
        Ok(())
    }
}

/// Load and validate a map file.
pub fn load_map(path: &Path) -> Result<Vec<WallDescriptor>, MapError> {
    let text = std::fs::read_to_string(path).map_err(|source| MapError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let walls = parse_map(&text)?;
    log::info!("Loaded {} walls from {}", walls.len(), path.display());
    Ok(walls)
}

/// Parse and validate a map from JSON text.
pub fn parse_map(json: &str) -> Result<Vec<WallDescriptor>, MapError> {
    let walls: Vec<WallDescriptor> = serde_json::from_str(json)?;
    for (index, wall) in walls.iter().enumerate() {
        wall.validate(index)?;
    }
    Ok(walls)
}

/// Serialize walls to the map JSON format.
pub fn serialize_map(walls: &[WallDescriptor]) -> Result<String, MapError> {
    Ok(serde_json::to_string_pretty(walls)?)
}

/// Write walls to a map file.
pub fn write_map(walls: &[WallDescriptor], path: &Path) -> Result<(), MapError> {
    let json = serialize_map(walls)?;
    std::fs::write(path, json).map_err(|source| MapError::Io {
        path: path.to_path_buf(),
        source,
    })
}
