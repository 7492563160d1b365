pub mod batch;
pub mod resolver;
pub mod tie_break;
