pub mod expr_transform;

pub use expr_transform::resolve_expr;
