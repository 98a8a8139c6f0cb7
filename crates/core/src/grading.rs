//! Grade aggregation engine.
//!
//! Pure logic -- no database access. The caller fetches category and
//! grade rows and passes lightweight snapshots in; everything here is
//! derived fresh on every call and nothing is persisted.
//!
//! This module is the single source of truth for the weighting
//! formulas. Presentation layers must call it rather than re-deriving
//! percentages themselves.

use serde::Serialize;

/// A percentage that may be undefined.
///
/// When the denominator of a ratio is zero (no grades yet, or every
/// grade has zero weight) there is no meaningful percentage. That case
/// is an explicit `NoData` variant, never `NaN` and never a silent `0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Percentage {
    /// A defined ratio in `[0, ..)` -- may exceed 1.0 with extra credit.
    Value(f64),
    /// Denominator was zero or the underlying data was unusable.
    NoData,
}

impl Percentage {
    /// Build a percentage from a numerator and denominator.
    ///
    /// Returns `NoData` unless the denominator is strictly positive and
    /// both operands are finite.
    pub fn ratio(achieved: f64, possible: f64) -> Self {
        if possible > 0.0 && achieved.is_finite() && possible.is_finite() {
            Percentage::Value(achieved / possible)
        } else {
            Percentage::NoData
        }
    }

    /// The defined value, if any.
    pub fn value(self) -> Option<f64> {
        match self {
            Percentage::Value(v) => Some(v),
            Percentage::NoData => None,
        }
    }
}

/// Coarse visual severity band for a defined percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorBand {
    Bad,
    Mid,
    Good,
}

impl ColorBand {
    /// Band for a fraction: `< 0.55` bad, `< 0.75` mid, otherwise good.
    pub fn for_fraction(fraction: f64) -> Self {
        if fraction < 0.55 {
            ColorBand::Bad
        } else if fraction < 0.75 {
            ColorBand::Mid
        } else {
            ColorBand::Good
        }
    }

    /// Band for a possibly-undefined percentage.
    pub fn for_percentage(percentage: Percentage) -> Option<Self> {
        percentage.value().map(Self::for_fraction)
    }
}

/// One band of a GPA scale: every fraction at or above `min` (and below
/// the next-higher band's `min`) maps to `grade_points`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GpaBand {
    pub min: f64,
    pub grade_points: f64,
}

/// Ordered GPA threshold table, highest band first.
///
/// Bands are inclusive on the lower bound and evaluated top-down; the
/// first band whose `min` the fraction reaches wins. The scale is
/// configuration passed in by the caller, not something each call site
/// hardcodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GpaScale {
    bands: Vec<GpaBand>,
}

impl GpaScale {
    /// Build a scale from bands ordered highest `min` first.
    pub fn new(bands: Vec<GpaBand>) -> Self {
        Self { bands }
    }

    /// Map a fraction to grade points. Fractions below every band map
    /// to the lowest band's points; an empty scale yields `None`.
    pub fn grade_points(&self, fraction: f64) -> Option<f64> {
        self.bands
            .iter()
            .find(|band| fraction >= band.min)
            .or_else(|| self.bands.last())
            .map(|band| band.grade_points)
    }

    /// Grade points for a possibly-undefined percentage.
    pub fn for_percentage(&self, percentage: Percentage) -> Option<f64> {
        percentage.value().and_then(|f| self.grade_points(f))
    }
}

impl Default for GpaScale {
    /// The standard 4.0 scale used when no custom table is configured.
    fn default() -> Self {
        Self::new(vec![
            GpaBand { min: 0.85, grade_points: 4.0 },
            GpaBand { min: 0.80, grade_points: 3.7 },
            GpaBand { min: 0.75, grade_points: 3.3 },
            GpaBand { min: 0.70, grade_points: 3.0 },
            GpaBand { min: 0.65, grade_points: 2.7 },
            GpaBand { min: 0.60, grade_points: 2.3 },
            GpaBand { min: 0.55, grade_points: 2.0 },
            GpaBand { min: 0.50, grade_points: 1.0 },
            GpaBand { min: 0.0, grade_points: 0.0 },
        ])
    }
}

/// Raw numbers for a single graded item.
#[derive(Debug, Clone, Copy)]
pub struct GradeSnapshot {
    pub achieved: f64,
    pub possible: f64,
    pub weight: f64,
}

/// A category's weight plus the raw numbers of its grades.
#[derive(Debug, Clone)]
pub struct CategorySnapshot {
    pub weight: f64,
    pub grades: Vec<GradeSnapshot>,
}

/// Derived statistics for one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotals {
    /// Sum of `achieved x weight` over usable grades.
    pub achieved: f64,
    /// Sum of `possible x weight` over usable grades.
    pub possible: f64,
    pub percentage: Percentage,
    /// "Points out of the category weight" display value:
    /// `achieved x category_weight / possible`. `None` when undefined.
    pub weighted_points: Option<f64>,
    pub color: Option<ColorBand>,
}

/// Derived statistics for a whole course.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseTotals {
    pub achieved: f64,
    pub possible: f64,
    pub percentage: Percentage,
    pub grade_points: Option<f64>,
    pub color: Option<ColorBand>,
}

/// Whether a grade's stored numbers are usable for aggregation.
///
/// A corrupt item (non-finite value, or a non-positive maximum) is
/// skipped rather than failing the whole read, so one bad row never
/// blocks viewing the rest of a course.
fn usable(grade: &GradeSnapshot) -> bool {
    grade.achieved.is_finite()
        && grade.possible.is_finite()
        && grade.weight.is_finite()
        && grade.possible > 0.0
}

/// Compute a category's achieved/possible totals and derived stats.
///
/// `achieved = sum(points_achieved x weight)`,
/// `possible = sum(points_possible x weight)`; the percentage is their
/// ratio, `NoData` when the denominator is zero.
pub fn category_totals(category_weight: f64, grades: &[GradeSnapshot]) -> CategoryTotals {
    let mut achieved = 0.0;
    let mut possible = 0.0;
    for grade in grades.iter().filter(|g| usable(g)) {
        achieved += grade.achieved * grade.weight;
        possible += grade.possible * grade.weight;
    }

    let percentage = Percentage::ratio(achieved, possible);
    let weighted_points = match percentage {
        Percentage::Value(_) if category_weight.is_finite() => {
            Some(achieved * category_weight / possible)
        }
        _ => None,
    };

    CategoryTotals {
        achieved,
        possible,
        percentage,
        weighted_points,
        color: ColorBand::for_percentage(percentage),
    }
}

/// Compute course-level totals from category snapshots.
///
/// Per category: `cat_act = sum(achieved x weight)` and
/// `cat_max = sum(possible x weight)` over its grades, then accumulate
/// `course_act += cat_act x category_weight` and
/// `course_max += cat_max x category_weight`. The course percentage is
/// `course_act / course_max`. Categories with no usable data contribute
/// nothing rather than poisoning the totals.
pub fn course_totals(categories: &[CategorySnapshot], scale: &GpaScale) -> CourseTotals {
    let mut course_act = 0.0;
    let mut course_max = 0.0;
    for category in categories {
        if !category.weight.is_finite() {
            continue;
        }
        let totals = category_totals(category.weight, &category.grades);
        if totals.percentage == Percentage::NoData {
            continue;
        }
        course_act += totals.achieved * category.weight;
        course_max += totals.possible * category.weight;
    }

    let percentage = Percentage::ratio(course_act, course_max);

    CourseTotals {
        achieved: course_act,
        possible: course_max,
        percentage,
        grade_points: scale.for_percentage(percentage),
        color: ColorBand::for_percentage(percentage),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grade(achieved: f64, possible: f64, weight: f64) -> GradeSnapshot {
        GradeSnapshot {
            achieved,
            possible,
            weight,
        }
    }

    #[test]
    fn test_category_totals_weighted_sum() {
        // Two quizzes: 4/8 and 6/8, each at weight 5.
        let totals = category_totals(20.0, &[grade(4.0, 8.0, 5.0), grade(6.0, 8.0, 5.0)]);

        assert_eq!(totals.achieved, 50.0);
        assert_eq!(totals.possible, 80.0);
        assert_eq!(totals.percentage, Percentage::Value(0.625));
        assert_eq!(totals.color, Some(ColorBand::Mid));
        // 50 x 20 / 80 = 12.5 points out of the category's 20.
        assert_eq!(totals.weighted_points, Some(12.5));
    }

    #[test]
    fn test_empty_category_is_no_data() {
        let totals = category_totals(20.0, &[]);

        assert_eq!(totals.percentage, Percentage::NoData);
        assert_eq!(totals.weighted_points, None);
        assert_eq!(totals.color, None);
    }

    #[test]
    fn test_zero_weight_grades_are_no_data() {
        // All weights zero: denominator is zero, not a 0% result.
        let totals = category_totals(10.0, &[grade(5.0, 10.0, 0.0), grade(8.0, 10.0, 0.0)]);

        assert_eq!(totals.percentage, Percentage::NoData);
        assert!(totals
            .percentage
            .value()
            .is_none(), "no data must never surface as a number");
    }

    #[test]
    fn test_corrupt_grade_is_skipped() {
        // The NaN row is dropped; the remaining quiz still computes.
        let totals = category_totals(20.0, &[grade(f64::NAN, 8.0, 5.0), grade(4.0, 8.0, 5.0)]);

        assert_eq!(totals.achieved, 20.0);
        assert_eq!(totals.possible, 40.0);
        assert_eq!(totals.percentage, Percentage::Value(0.5));
    }

    #[test]
    fn test_non_positive_maximum_is_skipped() {
        let totals = category_totals(20.0, &[grade(4.0, 0.0, 5.0)]);
        assert_eq!(totals.percentage, Percentage::NoData);
    }

    #[test]
    fn test_course_totals_accumulate_by_category_weight() {
        let scale = GpaScale::default();
        let categories = vec![
            // Quizzes, weight 20: 50/80 internally.
            CategorySnapshot {
                weight: 20.0,
                grades: vec![grade(4.0, 8.0, 5.0), grade(6.0, 8.0, 5.0)],
            },
            // Exams, weight 80: 90/100 internally.
            CategorySnapshot {
                weight: 80.0,
                grades: vec![grade(90.0, 100.0, 1.0)],
            },
        ];

        let totals = course_totals(&categories, &scale);

        // 50x20 + 90x80 = 8200 over 80x20 + 100x80 = 9600.
        assert_eq!(totals.achieved, 8200.0);
        assert_eq!(totals.possible, 9600.0);
        let fraction = totals.percentage.value().unwrap();
        assert!((fraction - 8200.0 / 9600.0).abs() < 1e-12);
        assert_eq!(totals.grade_points, Some(4.0));
        assert_eq!(totals.color, Some(ColorBand::Good));
    }

    #[test]
    fn test_course_with_single_half_scored_quiz() {
        // The walkthrough case: one category (weight 20) holding a
        // single 4/8 quiz at weight 5 gives 50% and 1.0 grade points.
        let scale = GpaScale::default();
        let categories = vec![CategorySnapshot {
            weight: 20.0,
            grades: vec![grade(4.0, 8.0, 5.0)],
        }];

        let totals = course_totals(&categories, &scale);

        assert_eq!(totals.percentage, Percentage::Value(0.5));
        assert_eq!(totals.grade_points, Some(1.0));
        assert_eq!(totals.color, Some(ColorBand::Bad));
    }

    #[test]
    fn test_empty_course_is_no_data() {
        let totals = course_totals(&[], &GpaScale::default());
        assert_eq!(totals.percentage, Percentage::NoData);
        assert_eq!(totals.grade_points, None);
        assert_eq!(totals.color, None);
    }

    #[test]
    fn test_no_data_category_does_not_poison_course() {
        let scale = GpaScale::default();
        let categories = vec![
            CategorySnapshot {
                weight: 30.0,
                grades: vec![],
            },
            CategorySnapshot {
                weight: 70.0,
                grades: vec![grade(7.0, 10.0, 1.0)],
            },
        ];

        let totals = course_totals(&categories, &scale);
        assert_eq!(totals.percentage, Percentage::Value(0.7));
        assert_eq!(totals.grade_points, Some(3.0));
    }

    #[test]
    fn test_gpa_band_lower_bounds_are_inclusive() {
        let scale = GpaScale::default();
        assert_eq!(scale.grade_points(0.85), Some(4.0));
        assert_eq!(scale.grade_points(0.849999), Some(3.7));
        assert_eq!(scale.grade_points(0.80), Some(3.7));
        assert_eq!(scale.grade_points(0.75), Some(3.3));
        assert_eq!(scale.grade_points(0.70), Some(3.0));
        assert_eq!(scale.grade_points(0.65), Some(2.7));
        assert_eq!(scale.grade_points(0.60), Some(2.3));
        assert_eq!(scale.grade_points(0.55), Some(2.0));
        assert_eq!(scale.grade_points(0.50), Some(1.0));
        assert_eq!(scale.grade_points(0.49), Some(0.0));
        assert_eq!(scale.grade_points(0.0), Some(0.0));
    }

    #[test]
    fn test_gpa_scale_handles_extra_credit() {
        // Fractions above 1.0 still land in the top band.
        let scale = GpaScale::default();
        assert_eq!(scale.grade_points(1.05), Some(4.0));
    }

    #[test]
    fn test_color_band_boundaries() {
        assert_eq!(ColorBand::for_fraction(0.0), ColorBand::Bad);
        assert_eq!(ColorBand::for_fraction(0.549), ColorBand::Bad);
        assert_eq!(ColorBand::for_fraction(0.55), ColorBand::Mid);
        assert_eq!(ColorBand::for_fraction(0.749), ColorBand::Mid);
        assert_eq!(ColorBand::for_fraction(0.75), ColorBand::Good);
        assert_eq!(ColorBand::for_fraction(1.0), ColorBand::Good);
    }

    #[test]
    fn test_percentage_serializes_with_explicit_tag() {
        let value = serde_json::to_value(Percentage::Value(0.625)).unwrap();
        assert_eq!(value["kind"], "value");
        assert_eq!(value["value"], 0.625);

        let no_data = serde_json::to_value(Percentage::NoData).unwrap();
        assert_eq!(no_data["kind"], "no_data");
        assert!(no_data.get("value").is_none());
    }

    #[test]
    fn test_aggregation_is_deterministic() {
        // Same inputs, same outputs: reads recompute from raw values.
        let grades = [grade(4.0, 8.0, 5.0), grade(6.0, 8.0, 5.0)];
        assert_eq!(category_totals(20.0, &grades), category_totals(20.0, &grades));
    }
}
