use std::str::FromStr;

use oberonx_base::source_file::Location;
use proptest::{prop_assert, proptest};
use strum::IntoEnumIterator;

use super::{KeywordKind, Token, TokenKind};

#[test]
fn keyword_spellings() {
    assert_eq!(KeywordKind::from_str("MODULE"), Ok(KeywordKind::Module));
    assert_eq!(KeywordKind::from_str("module"), Ok(KeywordKind::Module));
    assert!(KeywordKind::from_str("Module").is_err());
    assert!(KeywordKind::from_str("mODULE").is_err());
    assert!(KeywordKind::from_str("").is_err());
}

#[test]
fn every_keyword_has_both_spellings() {
    for keyword in KeywordKind::iter() {
        assert_eq!(KeywordKind::from_str(keyword.as_str()), Ok(keyword));
        assert_eq!(
            KeywordKind::from_str(&keyword.as_str().to_ascii_lowercase()),
            Ok(keyword)
        );
    }
}

#[test]
fn statement_keywords() {
    let starters = KeywordKind::iter()
        .filter(|keyword| keyword.starts_statement())
        .count();
    assert_eq!(starters, 9);
    assert!(!KeywordKind::End.starts_statement());
}

#[test]
fn token_display() {
    let identifier = Token::new(TokenKind::Identifier, "x".to_owned(), Location::new(2, 5));
    assert_eq!(identifier.to_string(), "2:5 identifier x");

    let assign = Token::bare(TokenKind::Assign, Location::new(1, 3));
    assert_eq!(assign.to_string(), "1:3 ':='");

    let keyword = Token::bare(KeywordKind::Begin.into(), Location::default());
    assert_eq!(keyword.to_string(), "1:1 'BEGIN'");

    assert_eq!(Token::eof(Location::default()).kind(), TokenKind::Eof);
}

proptest! {
    #[test]
    fn mixed_case_spellings_are_not_keywords(
        keyword in proptest::sample::select(KeywordKind::iter().collect::<Vec<_>>()),
    ) {
        let upper = keyword.as_str();
        let mut mixed = upper[..1].to_owned();
        mixed.push_str(&upper[1..].to_ascii_lowercase());

        // single-letter keywords do not exist, so `mixed` always differs from both spellings
        prop_assert!(KeywordKind::from_str(&mixed).is_err());
    }
}
