use recipeui::json::parse_relaxed;
use recipeui::{RecipeError, Result};

#[test]
fn test_parse_error() {
    let err = RecipeError::ParseError("test error".to_string());
    assert_eq!(err.to_string(), "解析错误: test error");
}

#[test]
fn test_invalid_url() {
    let err = RecipeError::InvalidUrl("not a url".to_string());
    assert_eq!(err.to_string(), "无效的 URL: not a url");
}

#[test]
fn test_error_conversion_from_anyhow() {
    let anyhow_err = anyhow::anyhow!("test anyhow error");
    let recipe_err: RecipeError = anyhow_err.into();
    assert!(recipe_err.to_string().contains("test anyhow error"));
}

#[test]
fn test_relaxed_json_error() {
    let err = parse_relaxed("{bad json").unwrap_err();
    assert!(matches!(err, RecipeError::RelaxedJsonError(_)));
    assert!(err.to_string().starts_with("JSON5 解析错误"));
}

#[test]
fn test_result_type() {
    fn returns_error() -> Result<()> {
        Err(RecipeError::ParseError("test".to_string()))
    }

    let result = returns_error();
    assert!(result.is_err());
    match result {
        Err(RecipeError::ParseError(msg)) => assert_eq!(msg, "test"),
        _ => panic!("Expected ParseError"),
    }
}
