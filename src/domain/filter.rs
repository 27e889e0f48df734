use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

use super::user::User;

/// 邮箱格式检查：只锚定开头，只做最基本的形状校验
const EMAIL_PATTERN: &str = r"^[^@]+@[^@]+\.[^@]+";

/// 筛选方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Name,
    Age,
    Email,
}

impl FilterKind {
    /// 读取查询内容时的提示语
    pub fn prompt(&self) -> &'static str {
        match self {
            FilterKind::Name => "Enter a name to filter users: ",
            FilterKind::Age => "Enter an age to filter users: ",
            FilterKind::Email => "Enter an email to filter users: ",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKind::Name => "name",
            FilterKind::Age => "age",
            FilterKind::Email => "email",
        }
    }

    /// 按当前方式筛选
    pub fn apply<'a>(self, users: &'a [User], query: &str) -> Result<Vec<&'a User>, InvalidQuery> {
        match self {
            FilterKind::Name => Ok(filter_by_name(users, query)),
            FilterKind::Age => filter_by_age(users, query),
            FilterKind::Email => filter_by_email(users, query),
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 不支持的筛选方式，保存规范化后的输入
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unsupported filter option.")]
pub struct UnsupportedOption(pub String);

impl FromStr for FilterKind {
    type Err = UnsupportedOption;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let option = input.trim().to_lowercase();
        match option.as_str() {
            "name" => Ok(FilterKind::Name),
            "age" => Ok(FilterKind::Age),
            "email" => Ok(FilterKind::Email),
            _ => Err(UnsupportedOption(option)),
        }
    }
}

/// 查询内容格式无效。调用方打印提示后按空结果继续
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidQuery {
    #[error("Invalid age: must be a number.")]
    Age(String),
    #[error("Invalid email format.")]
    Email(String),
}

/// 按姓名筛选（不区分大小写的完全匹配）
pub fn filter_by_name<'a>(users: &'a [User], name: &str) -> Vec<&'a User> {
    let wanted = name.to_lowercase();
    users
        .iter()
        .filter(|user| user.name_or_empty().to_lowercase() == wanted)
        .collect()
}

/// 按年龄筛选
///
/// 输入必须全部是十进制数字。记录中的年龄转为文本后与输入做完全匹配，
/// 因此 `"030"` 不等于 `30`。
pub fn filter_by_age<'a>(users: &'a [User], age: &str) -> Result<Vec<&'a User>, InvalidQuery> {
    if !is_valid_age(age) {
        return Err(InvalidQuery::Age(age.to_string()));
    }

    Ok(users
        .iter()
        .filter(|user| user.age_text().as_deref() == Some(age))
        .collect())
}

/// 按邮箱筛选（不区分大小写的完全匹配）
pub fn filter_by_email<'a>(users: &'a [User], email: &str) -> Result<Vec<&'a User>, InvalidQuery> {
    if !is_valid_email(email) {
        return Err(InvalidQuery::Email(email.to_string()));
    }

    let wanted = email.to_lowercase();
    Ok(users
        .iter()
        .filter(|user| user.email_or_empty().to_lowercase() == wanted)
        .collect())
}

pub fn is_valid_age(age: &str) -> bool {
    !age.is_empty() && age.chars().all(|c| c.is_ascii_digit())
}

pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

fn email_regex() -> &'static Regex {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    EMAIL_REGEX.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern is a valid regex"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn users(json: &str) -> Vec<User> {
        serde_json::from_str(json).unwrap()
    }

    fn names(results: &[&User]) -> Vec<String> {
        results.iter().map(|u| u.name_or_empty().to_string()).collect()
    }

    #[test]
    fn test_name_case_insensitive() {
        let all = users(r#"[{"name": "Alice"}, {"name": "Bob"}, {"name": "ALICE"}]"#);
        let results = filter_by_name(&all, "alice");
        assert_eq!(names(&results), vec!["Alice", "ALICE"]);
    }

    #[test]
    fn test_name_missing_field() {
        let all = users(r#"[{"email": "x@y.z"}, {"name": "Bob"}]"#);
        assert!(filter_by_name(&all, "bob").len() == 1);
        assert!(filter_by_name(&all, "carol").is_empty());

        // 缺失姓名视为空字符串，只有空查询能匹配
        let results = filter_by_name(&all, "");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].email_or_empty(), "x@y.z");
    }

    #[test]
    fn test_age_rejects_non_digits() {
        let all = users(r#"[{"name": "Bob", "age": 12}]"#);
        for input in ["12a", "-5", "", " 12", "1.5", "٣"] {
            assert_eq!(
                filter_by_age(&all, input),
                Err(InvalidQuery::Age(input.to_string())),
                "input {:?}",
                input
            );
        }
    }

    #[test]
    fn test_age_text_equality() {
        let all = users(
            r#"[
                {"name": "a", "age": 30},
                {"name": "b", "age": "030"},
                {"name": "c", "age": "30"},
                {"name": "d", "age": 30.0},
                {"name": "e"}
            ]"#,
        );
        let results = filter_by_age(&all, "30").unwrap();
        assert_eq!(names(&results), vec!["a", "c"]);

        let results = filter_by_age(&all, "030").unwrap();
        assert_eq!(names(&results), vec!["b"]);
    }

    #[test]
    fn test_email_validation() {
        assert!(!is_valid_email("foo"));
        assert!(!is_valid_email("foo@bar"));
        assert!(!is_valid_email("@bar.com"));
        assert!(!is_valid_email(""));
        assert!(is_valid_email("foo@bar.com"));
        assert!(is_valid_email("a.b@c.d.e"));
        // 只锚定开头，后缀不再检查
        assert!(is_valid_email("a@b.c@d"));

        let all = users(r#"[{"email": "foo@bar"}]"#);
        assert_eq!(
            filter_by_email(&all, "foo@bar"),
            Err(InvalidQuery::Email("foo@bar".to_string()))
        );
    }

    #[test]
    fn test_email_case_insensitive() {
        let all = users(r#"[{"name": "x", "email": "a@b.com"}, {"name": "y"}]"#);
        let results = filter_by_email(&all, "A@B.com").unwrap();
        assert_eq!(names(&results), vec!["x"]);
    }

    #[test]
    fn test_filter_kind_parsing() {
        assert_eq!("name".parse::<FilterKind>(), Ok(FilterKind::Name));
        assert_eq!("  AGE \n".parse::<FilterKind>(), Ok(FilterKind::Age));
        assert_eq!("Email".parse::<FilterKind>(), Ok(FilterKind::Email));
        assert_eq!(
            " Other ".parse::<FilterKind>(),
            Err(UnsupportedOption("other".to_string()))
        );
    }

    #[test]
    fn test_diagnostic_messages() {
        assert_eq!(InvalidQuery::Age(String::new()).to_string(), "Invalid age: must be a number.");
        assert_eq!(InvalidQuery::Email(String::new()).to_string(), "Invalid email format.");
        assert_eq!(UnsupportedOption(String::new()).to_string(), "Unsupported filter option.");
    }
}
