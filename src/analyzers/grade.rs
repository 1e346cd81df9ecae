/// Which threshold ladder a score is graded on.
///
/// Route scores are min-max normalized before grading; airline scores are
/// graded raw and so use a stricter ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradeScale {
    Route,
    Airline,
}

/// Converts a 0–100 health score into a letter grade.
///
/// | Grade | Route  | Airline |
/// |-------|--------|---------|
/// | A+    | >= 80  | >= 90   |
/// | A     | >= 70  | >= 80   |
/// | B     | >= 60  | >= 70   |
/// | C     | >= 50  | >= 60   |
/// | D     | >= 40  | >= 50   |
/// | F     | below  | below   |
pub fn grade(score: f64, scale: GradeScale) -> String {
    let letter = match scale {
        GradeScale::Route => route_grade(score),
        GradeScale::Airline => airline_grade(score),
    };
    letter.into()
}

fn route_grade(score: f64) -> &'static str {
    match score {
        s if s >= 80.0 => "A+",
        s if s >= 70.0 => "A",
        s if s >= 60.0 => "B",
        s if s >= 50.0 => "C",
        s if s >= 40.0 => "D",
        _ => "F",
    }
}

fn airline_grade(score: f64) -> &'static str {
    match score {
        s if s >= 90.0 => "A+",
        s if s >= 80.0 => "A",
        s if s >= 70.0 => "B",
        s if s >= 60.0 => "C",
        s if s >= 50.0 => "D",
        _ => "F",
    }
}
