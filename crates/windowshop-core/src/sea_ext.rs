use sea_orm::sea_query::{Expr, Func, IntoColumnRef, LikeExpr, SimpleExpr};

/// Escape character used for LIKE patterns built by [`contains_ignore_case`].
pub const LIKE_ESCAPE: char = '\\';

/// Escape `%`, `_` and the escape character itself so `needle` matches literally.
pub fn escape_like(needle: &str) -> String {
    let mut out = String::with_capacity(needle.len());
    for c in needle.chars() {
        if c == '%' || c == '_' || c == LIKE_ESCAPE {
            out.push(LIKE_ESCAPE);
        }
        out.push(c);
    }
    out
}

/// `LOWER(col) LIKE '%needle%' ESCAPE '\'`. The needle is bound, never inlined.
///
/// Callers pass an already lower-cased needle.
pub fn contains_ignore_case<C: IntoColumnRef>(col: C, needle: &str) -> SimpleExpr {
    let pattern = format!("%{}%", escape_like(needle));
    Expr::expr(Func::lower(Expr::col(col))).like(LikeExpr::new(pattern).escape(LIKE_ESCAPE))
}
