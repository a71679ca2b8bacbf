pub mod fold;
pub mod inspect;
