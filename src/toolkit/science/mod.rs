pub mod detector;
pub mod latex;
pub mod prompt;
pub mod solver;

pub use detector::is_scientific_query;
pub use latex::{FALLBACK_MARKER, post_process_latex};
pub use prompt::build_sci_latex_guideline;
pub use solver::{ScienceAnswer, ScienceSolver};
