//! Named boundary surfaces for the structured mesh builders.

use std::fmt;

/// Surface names for the two ends of an interval.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineSurfaces {
    /// x = x_min
    pub left: String,
    /// x = x_max
    pub right: String,
}

impl LineSurfaces {
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
        }
    }

    /// Same surface name at both ends.
    pub fn uniform(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            left: name.clone(),
            right: name,
        }
    }

    /// Surface on local face `face` of a line element (0 = left end).
    pub fn get(&self, face: usize) -> Option<&str> {
        match face {
            0 => Some(&self.left),
            1 => Some(&self.right),
            _ => None,
        }
    }
}

impl From<[&str; 2]> for LineSurfaces {
    fn from([left, right]: [&str; 2]) -> Self {
        Self::new(left, right)
    }
}

/// Surface names with named fields for each side of a rectangle.
///
/// Index convention follows the quadrangle face ordering
/// (counter-clockwise from the bottom): 0=south, 1=east, 2=north, 3=west.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RectangleSurfaces {
    /// y = y_min
    pub south: String,
    /// x = x_max
    pub east: String,
    /// y = y_max
    pub north: String,
    /// x = x_min
    pub west: String,
}

impl RectangleSurfaces {
    pub fn new(
        south: impl Into<String>,
        east: impl Into<String>,
        north: impl Into<String>,
        west: impl Into<String>,
    ) -> Self {
        Self {
            south: south.into(),
            east: east.into(),
            north: north.into(),
            west: west.into(),
        }
    }

    /// Same surface name on all sides.
    pub fn uniform(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            south: name.clone(),
            east: name.clone(),
            north: name.clone(),
            west: name,
        }
    }

    pub fn get(&self, face: usize) -> Option<&str> {
        match face {
            0 => Some(&self.south),
            1 => Some(&self.east),
            2 => Some(&self.north),
            3 => Some(&self.west),
            _ => None,
        }
    }
}

impl From<[&str; 4]> for RectangleSurfaces {
    fn from([south, east, north, west]: [&str; 4]) -> Self {
        Self::new(south, east, north, west)
    }
}

impl fmt::Display for RectangleSurfaces {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "S:{} E:{} N:{} W:{}",
            self.south, self.east, self.north, self.west
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_by_face() {
        let sides = RectangleSurfaces::new("bottom", "outlet", "top", "inlet");
        assert_eq!(sides.get(1), Some("outlet"));
        assert_eq!(sides.get(3), Some("inlet"));
        assert_eq!(sides.get(4), None);
    }

    #[test]
    fn test_uniform_and_display() {
        let sides = RectangleSurfaces::uniform("wall");
        assert_eq!(sides.to_string(), "S:wall E:wall N:wall W:wall");
        let ends: LineSurfaces = ["a", "b"].into();
        assert_eq!(ends.get(0), Some("a"));
        assert_eq!(LineSurfaces::uniform("x").right, "x");
    }
}
