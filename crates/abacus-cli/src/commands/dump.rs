//! Token and AST dump commands for tooling

use abacus_runtime::{parse, tokenize};
use anyhow::{Context, Result};

/// Print the token stream of an expression as JSON, one token per line
pub fn tokens(expression: &str) -> Result<()> {
    let tokens = match tokenize(expression) {
        Ok(tokens) => tokens,
        Err(err) => {
            eprintln!("{}", err.pretty(expression));
            return Err(anyhow::anyhow!("Failed to tokenize expression"));
        }
    };

    for token in &tokens {
        let line = serde_json::to_string(token).context("Failed to serialize token")?;
        println!("{}", line);
    }
    Ok(())
}

/// Print the parse tree of an expression as pretty-printed JSON
pub fn ast(expression: &str) -> Result<()> {
    let expr = match parse(expression) {
        Ok(expr) => expr,
        Err(err) => {
            eprintln!("{}", err.pretty(expression));
            return Err(anyhow::anyhow!("Failed to parse expression"));
        }
    };

    let json = serde_json::to_string_pretty(&expr).context("Failed to serialize AST")?;
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_valid_expression() {
        assert!(tokens("10 + foo").is_ok());
    }

    #[test]
    fn test_tokens_lexical_error() {
        assert!(tokens("1 = 2").is_err());
    }

    #[test]
    fn test_ast_valid_expression() {
        assert!(ast("1 + 2 * 3").is_ok());
    }

    #[test]
    fn test_ast_syntax_error() {
        assert!(ast("(1 + 2").is_err());
    }

    #[test]
    fn test_token_serialization_shape() {
        let tokens = tokenize("10 + foo").unwrap();
        let json: serde_json::Value = serde_json::to_value(&tokens[0]).unwrap();
        assert_eq!(json["kind"], "Number");
        assert_eq!(json["lexeme"], "10");
        assert_eq!(json["span"]["start"], 0);
        assert_eq!(json["span"]["end"], 2);
    }

    #[test]
    fn test_ast_serialization_shape() {
        let expr = parse("1 + 2").unwrap();
        let json = serde_json::to_value(&expr).unwrap();
        assert!(json.get("Binary").is_some());
    }
}
