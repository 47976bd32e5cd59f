//! Command Parsing Tests
//!
//! Tests for tokenizing command text and validating argument shape.

use hashkv::protocol::{tokenize, Command, CommandType, MAX_ECHOED_NAME};
use hashkv::CommandError;

// =============================================================================
// Tokenizer Tests
// =============================================================================

#[test]
fn test_tokenize_whitespace() {
    assert_eq!(
        tokenize("  HINCRBY\tkey  field1 10 ").unwrap(),
        vec!["HINCRBY", "key", "field1", "10"]
    );
}

#[test]
fn test_tokenize_empty_line() {
    assert!(tokenize("").unwrap().is_empty());
    assert!(tokenize("   ").unwrap().is_empty());
}

#[test]
fn test_tokenize_quoted_arguments() {
    assert_eq!(
        tokenize(r#"HSET user "display name" "say \"hi\"""#).unwrap(),
        vec!["HSET", "user", "display name", "say \"hi\""]
    );
    assert_eq!(tokenize(r#"SET k """#).unwrap(), vec!["SET", "k", ""]);
}

#[test]
fn test_tokenize_quote_inside_word_is_literal() {
    assert_eq!(tokenize(r#"SET k a"b"#).unwrap(), vec!["SET", "k", "a\"b"]);
}

#[test]
fn test_tokenize_unbalanced_quotes() {
    assert_eq!(tokenize(r#"SET k "open"#), Err(CommandError::UnbalancedQuotes));
    assert_eq!(tokenize(r#"SET k "a"b"#), Err(CommandError::UnbalancedQuotes));
}

// =============================================================================
// HINCRBY Parsing Tests
// =============================================================================

#[test]
fn test_parse_hincrby() {
    assert_eq!(
        Command::parse("HINCRBY key field1 10").unwrap(),
        Command::HIncrBy {
            key: "key".to_string(),
            field: "field1".to_string(),
            delta: 10,
        }
    );
}

#[test]
fn test_parse_keyword_is_case_insensitive() {
    let command = Command::parse("hIncrBy key f -5").unwrap();
    assert_eq!(command.command_type(), CommandType::HIncrBy);
    assert!(matches!(command, Command::HIncrBy { delta: -5, .. }));
}

#[test]
fn test_parse_hincrby_wrong_arity() {
    let expected = Err(CommandError::WrongArity("hincrby".to_string()));
    assert_eq!(Command::parse("HINCRBY key field"), expected);
    assert_eq!(Command::parse("HINCRBY key field 1 2"), expected);
    assert_eq!(Command::parse("HINCRBY"), expected);
}

#[test]
fn test_parse_hincrby_invalid_delta() {
    for delta in ["abc", "1.5", "9223372036854775808", "1e2", "\"\""] {
        let line = format!("HINCRBY key field {}", delta);
        assert_eq!(
            Command::parse(&line),
            Err(CommandError::InvalidInteger),
            "delta {:?}",
            delta
        );
    }
}

#[test]
fn test_parse_hincrby_extreme_deltas() {
    assert!(matches!(
        Command::parse("HINCRBY k f -9223372036854775808").unwrap(),
        Command::HIncrBy { delta: i64::MIN, .. }
    ));
    assert!(matches!(
        Command::parse("HINCRBY k f 9223372036854775807").unwrap(),
        Command::HIncrBy { delta: i64::MAX, .. }
    ));
}

// =============================================================================
// Supporting Command Parsing Tests
// =============================================================================

#[test]
fn test_parse_hset_pairs() {
    assert_eq!(
        Command::parse("HSET h a 1 b 2").unwrap(),
        Command::HSet {
            key: "h".to_string(),
            pairs: vec![
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "2".to_string()),
            ],
        }
    );
}

#[test]
fn test_parse_hset_wrong_arity() {
    let expected = Err(CommandError::WrongArity("hset".to_string()));
    assert_eq!(Command::parse("HSET h"), expected);
    assert_eq!(Command::parse("HSET h a"), expected);
    assert_eq!(Command::parse("HSET h a 1 b"), expected);
}

#[test]
fn test_parse_set_hget_del_ping() {
    assert_eq!(
        Command::parse("SET key value").unwrap(),
        Command::Set {
            key: "key".to_string(),
            value: "value".to_string(),
        }
    );
    assert_eq!(
        Command::parse("HGET key f").unwrap(),
        Command::HGet {
            key: "key".to_string(),
            field: "f".to_string(),
        }
    );
    assert_eq!(
        Command::parse("DEL a b").unwrap(),
        Command::Del {
            keys: vec!["a".to_string(), "b".to_string()],
        }
    );
    assert_eq!(Command::parse("PING").unwrap(), Command::Ping { message: None });
    assert_eq!(
        Command::parse("ping hello").unwrap(),
        Command::Ping {
            message: Some("hello".to_string()),
        }
    );
}

#[test]
fn test_parse_supporting_wrong_arity() {
    assert_eq!(
        Command::parse("SET key"),
        Err(CommandError::WrongArity("set".to_string()))
    );
    assert_eq!(
        Command::parse("HGET key"),
        Err(CommandError::WrongArity("hget".to_string()))
    );
    assert_eq!(
        Command::parse("DEL"),
        Err(CommandError::WrongArity("del".to_string()))
    );
    assert_eq!(
        Command::parse("PING a b"),
        Err(CommandError::WrongArity("ping".to_string()))
    );
}

#[test]
fn test_parse_unknown_and_empty() {
    assert_eq!(
        Command::parse("HINCRBYFLOAT k f 1.5"),
        Err(CommandError::UnknownCommand("HINCRBYFLOAT".to_string()))
    );
    assert_eq!(Command::parse(""), Err(CommandError::EmptyCommand));
}

#[test]
fn test_unknown_command_name_is_truncated() {
    let keyword = "Z".repeat(1000);
    let Err(CommandError::UnknownCommand(name)) = Command::parse(&keyword) else {
        panic!("expected unknown command");
    };
    assert_eq!(name.len(), MAX_ECHOED_NAME);
    assert_eq!(name, keyword[..MAX_ECHOED_NAME]);

    // 'é' is two bytes; the cut lands inside the last one and backs off
    let keyword = format!("{}{}", "a".repeat(MAX_ECHOED_NAME - 1), "é".repeat(10));
    let Err(CommandError::UnknownCommand(name)) = Command::parse(&keyword) else {
        panic!("expected unknown command");
    };
    assert_eq!(name, "a".repeat(MAX_ECHOED_NAME - 1));
}

#[test]
fn test_syntax_errors_are_classified() {
    assert!(CommandError::InvalidInteger.is_syntax());
    assert!(CommandError::WrongArity("hincrby".to_string()).is_syntax());
    assert!(!CommandError::WrongType.is_syntax());
    assert!(!CommandError::NotAnInteger.is_syntax());
    assert!(!CommandError::IncrementOverflow.is_syntax());
}
