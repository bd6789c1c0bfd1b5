//! Surface grade from `tracktype` or `surface`.

use super::{FeatureValue, ParseContext};
use crate::registry::{TagId, TagMap, TagTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GradeFeature {
    tag_surface: TagId,
    tag_track_type: TagId,
}

fn track_grade(value: &str) -> Option<u8> {
    match value {
        "grade1" => Some(1),
        "grade2" => Some(2),
        "grade3" => Some(3),
        "grade4" => Some(4),
        "grade5" => Some(5),
        _ => None,
    }
}

impl GradeFeature {
    pub(crate) fn initialize(&mut self, tags: &mut TagTable) {
        self.tag_surface = tags.register_internal("surface");
        self.tag_track_type = tags.register_internal("tracktype");
    }

    /// `tracktype=gradeN` wins; anything else falls back to the surface table.
    pub(crate) fn parse(&self, tags: &TagMap, ctx: &ParseContext<'_>) -> Option<FeatureValue> {
        if let Some(track_type) = tags.get(&self.tag_track_type) {
            if let Some(grade) = track_grade(track_type) {
                return Some(FeatureValue::Grade(grade));
            }

            ctx.warn(&format!("Unsupported tracktype value '{track_type}'"));
        }

        let surface = tags.get(&self.tag_surface)?;

        match ctx.config.grade_for_surface(surface) {
            Some(grade) => Some(FeatureValue::Grade(grade)),
            None => {
                ctx.warn(&format!("Unknown surface type '{surface}'"));
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_grades() {
        assert_eq!(track_grade("grade1"), Some(1));
        assert_eq!(track_grade("grade5"), Some(5));
        assert_eq!(track_grade("grade6"), None);
        assert_eq!(track_grade("Grade1"), None);
    }
}
