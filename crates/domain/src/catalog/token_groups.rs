use crate::entities::token::{Token, TokenGroup};

/// Group id, display name and member token ids.
const GROUPS: &[(&str, &str, &[&str])] = &[
    ("group-1", "USD Stablecoins", &["3", "4", "7"]),
    ("group-2", "BTC Pegged Tokens", &["5", "8", "6", "19", "9"]),
    ("group-3", "ETH Pegged Tokens", &["1"]),
];

/// Builds the shipped groups from `tokens`, keeping catalog order inside each group.
pub(crate) fn builtin_groups(tokens: &[Token]) -> Vec<TokenGroup> {
    GROUPS
        .iter()
        .map(|(id, name, members)| TokenGroup {
            id: (*id).to_string(),
            name: (*name).to_string(),
            tokens: tokens
                .iter()
                .filter(|token| {
                    token
                        .id
                        .as_deref()
                        .is_some_and(|token_id| members.contains(&token_id))
                })
                .cloned()
                .collect(),
        })
        .collect()
}
