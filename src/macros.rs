//! # Macros
//!
//! - [`sel!`](crate::sel) builds a [`Selector`](crate::Selector) from
//!   `dimension => label` pairs.

/// Builds a [`Selector`](crate::Selector).
///
/// Keys convert into `String`, values into
/// [`SelectorValue`](crate::SelectorValue), so string and integer labels can
/// be mixed.
///
/// ```rust
/// use minframe::{Label, SelectorValue, sel};
///
/// let s = sel! { "x" => "a", "t" => 2024, "z" => SelectorValue::All };
/// assert_eq!(s.len(), 3);
/// assert_eq!(s.get("t"), Some(&SelectorValue::Label(Label::Int(2024))));
/// assert!(sel! {}.is_empty());
/// ```
#[macro_export]
macro_rules! sel {
    () => {
        $crate::Selector::new()
    };
    ($($dim:expr => $label:expr),+ $(,)?) => {{
        let mut selector = $crate::Selector::new();
        $(
            selector.insert($dim, $label);
        )+
        selector
    }};
}
