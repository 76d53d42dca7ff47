use colored::Colorize;

/// Print an info message
pub fn info(msg: &str) {
    println!("{} {}", "ℹ".blue(), msg);
}

/// Print a success message
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print a warning message
pub fn warn(msg: &str) {
    println!("{} {}", "⚠".yellow(), msg);
}

/// Print a header/title
pub fn header(title: &str) {
    println!();
    println!("{}", title.bold());
    println!("{}", "─".repeat(title.chars().count()).dimmed());
}

/// Print a key-value pair
pub fn kv(key: &str, value: &str) {
    println!("  {}: {}", key.dimmed(), value);
}

/// Heading for a resource kind in plan listings
pub fn kind_title(kind: &str) -> &str {
    match kind {
        "repository" => "Repositories",
        "user" => "Users",
        "collaborator" => "Collaborators",
        "settings" => "Server settings",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_title() {
        assert_eq!(kind_title("repository"), "Repositories");
        assert_eq!(kind_title("collaborator"), "Collaborators");
        assert_eq!(kind_title("widget"), "widget");
    }
}
