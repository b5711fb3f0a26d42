//! Reduction of a file's raw license tokens to one SPDX expression.
//!
//! Scanners report a flat list per file where some entries are compound
//! expressions (`MIT OR Apache-2.0`) and others are bare identifiers. The
//! list is folded into a single top-level AND expression:
//!
//! - unparseable tokens and tokens with a top-level OR are kept whole,
//! - identifiers already embedded in a compound token are not repeated as
//!   bare AND terms,
//! - OR terms are parenthesized whenever they get combined with anything.

use crate::license::{ExprInfo, ExpressionResolver};
use crate::model::{Data, NO_LICENSE};
use std::collections::BTreeSet;

/// Where a single raw token ends up
#[derive(Debug, Clone, PartialEq, Eq)]
enum TokenClass {
    /// Unparseable or disjunctive; parenthesized when combined
    OrItem(String),
    /// Bare identifier or conjunction; dropped when a compound token embeds it
    Simple(String),
}

/// Classification of one token plus the identifiers it embeds
#[derive(Debug)]
struct ClassifiedToken {
    class: TokenClass,
    /// Identifiers of a valid compound token, must not also appear standalone
    embedded: Vec<String>,
}

impl ClassifiedToken {
    fn from_info(info: ExprInfo) -> Self {
        let embedded = if info.valid && !info.is_id_only && info.licenses.len() > 1 {
            info.licenses
        } else {
            Vec::new()
        };
        let class = if !info.valid || info.or_present {
            TokenClass::OrItem(info.friendly_expr)
        } else {
            TokenClass::Simple(info.friendly_expr)
        };
        Self { class, embedded }
    }
}

/// Build the normalized expression for one list of raw license tokens.
///
/// An empty list yields the no-license key `""`.
pub fn build_license_expr<S: AsRef<str>>(
    licenses: &[S],
    resolver: &dyn ExpressionResolver,
) -> String {
    let tokens: Vec<String> = if licenses.is_empty() {
        vec![NO_LICENSE.to_string()]
    } else {
        licenses
            .iter()
            .map(|token| token.as_ref().to_uppercase())
            .collect()
    };

    let mut simple_items = BTreeSet::new();
    let mut or_items = BTreeSet::new();
    let mut repeated = BTreeSet::new();

    for token in &tokens {
        let classified = ClassifiedToken::from_info(resolver.resolve(token));
        repeated.extend(classified.embedded);
        match classified.class {
            TokenClass::OrItem(item) => {
                or_items.insert(item);
            }
            TokenClass::Simple(item) => {
                simple_items.insert(item);
            }
        }
    }

    simple_items.retain(|item| !repeated.contains(item));

    let parenthesize = or_items.len() > 1 || !simple_items.is_empty();
    let mut items: BTreeSet<String> = or_items
        .into_iter()
        .map(|item| if parenthesize { format!("({item})") } else { item })
        .collect();
    items.extend(simple_items);

    items.into_iter().collect::<Vec<_>>().join(" AND ")
}

/// Set `license_expr` on every file
pub fn build_license_expressions(data: &mut Data, resolver: &dyn ExpressionResolver) {
    for file in &mut data.files {
        file.license_expr = build_license_expr(&file.licenses, resolver);
    }
    tracing::debug!(files = data.files.len(), "Built license expressions");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::license::SpdxExpressionResolver;

    fn expr(licenses: &[&str]) -> String {
        build_license_expr(licenses, &SpdxExpressionResolver::new())
    }

    #[test]
    fn single_identifier_is_kept_verbatim() {
        assert_eq!(expr(&["MIT"]), "MIT");
        assert_eq!(expr(&["Apache-2.0"]), "Apache-2.0");
    }

    #[test]
    fn identifiers_are_joined_with_and_in_sorted_order() {
        assert_eq!(expr(&["MIT", "Apache-2.0"]), "Apache-2.0 AND MIT");
    }

    #[test]
    fn or_term_is_parenthesized_next_to_simple_items() {
        assert_eq!(
            expr(&["MIT OR BSD-3-Clause", "GPL-2.0"]),
            "(MIT OR BSD-3-Clause) AND GPL-2.0"
        );
    }

    #[test]
    fn lone_or_term_is_not_parenthesized() {
        assert_eq!(expr(&["MIT OR BSD-3-Clause"]), "MIT OR BSD-3-Clause");
    }

    #[test]
    fn several_or_terms_are_all_parenthesized() {
        assert_eq!(
            expr(&["MIT OR Zlib", "ISC OR BSD-2-Clause"]),
            "(ISC OR BSD-2-Clause) AND (MIT OR Zlib)"
        );
    }

    #[test]
    fn identifiers_embedded_in_compound_terms_are_not_repeated() {
        assert_eq!(expr(&["MIT OR Apache-2.0", "MIT"]), "MIT OR Apache-2.0");
        assert_eq!(
            expr(&["MIT AND Zlib", "MIT", "ISC"]),
            "ISC AND MIT AND Zlib"
        );
    }

    #[test]
    fn empty_list_is_the_no_license_key() {
        assert_eq!(expr(&[]), "");
    }

    #[test]
    fn empty_token_is_the_no_license_key() {
        assert_eq!(expr(&[""]), "");
    }

    #[test]
    fn unparseable_tokens_are_kept_as_or_items() {
        assert_eq!(expr(&["GPL (>=2)"]), "GPL (>=2)");
        assert_eq!(expr(&["GPL (>=2)", "MIT"]), "(GPL (>=2)) AND MIT");
    }

    #[test]
    fn duplicate_tokens_collapse() {
        assert_eq!(expr(&["mit", "MIT", "Mit"]), "MIT");
    }

    #[test]
    fn classification_routes_tokens() {
        let resolver = SpdxExpressionResolver::new();

        let or_token = ClassifiedToken::from_info(resolver.resolve("MIT OR ISC"));
        assert_eq!(or_token.class, TokenClass::OrItem("MIT OR ISC".to_string()));
        assert_eq!(or_token.embedded, vec!["MIT", "ISC"]);

        let and_token = ClassifiedToken::from_info(resolver.resolve("MIT AND ISC"));
        assert_eq!(and_token.class, TokenClass::Simple("MIT AND ISC".to_string()));
        assert_eq!(and_token.embedded, vec!["MIT", "ISC"]);

        let bare = ClassifiedToken::from_info(resolver.resolve("MIT"));
        assert_eq!(bare.class, TokenClass::Simple("MIT".to_string()));
        assert!(bare.embedded.is_empty());

        let invalid = ClassifiedToken::from_info(resolver.resolve("MIT/ISC"));
        assert_eq!(invalid.class, TokenClass::OrItem("MIT/ISC".to_string()));
        assert!(invalid.embedded.is_empty());
    }
}
