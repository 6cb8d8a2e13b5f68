// Survey domain: the answer model and the registration form's field catalog.

pub mod answers;
pub mod fields;

pub use answers::{Answer, AnswerSet};
