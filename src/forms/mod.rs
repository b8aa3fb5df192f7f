use crate::components::group_icon::GroupIcon;
use crate::models::LinkGroup;

/// Raw values of the add/edit group form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct GroupForm {
    pub name: String,
    pub icon: String,
    /// One URL per line.
    pub urls: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct GroupFormErrors {
    pub name: Option<String>,
    pub urls: Option<String>,
}

impl GroupFormErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.urls.is_none()
    }
}

impl GroupForm {
    pub fn from_group(group: &LinkGroup) -> Self {
        Self {
            name: group.name.clone(),
            icon: group.icon.clone(),
            urls: group.urls.join("\n"),
        }
    }

    /// Non-blank lines, trimmed, in the order given.
    pub fn url_lines(&self) -> Vec<String> {
        self.urls
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Build the group, keeping `id` stable for edits.
    pub fn validate(&self, id: String) -> Result<LinkGroup, GroupFormErrors> {
        let mut errors = GroupFormErrors::default();

        let name = self.name.trim();
        if name.is_empty() {
            errors.name = Some("Group name is required".to_string());
        }

        let urls = self.url_lines();
        if urls.is_empty() {
            errors.urls = Some("Add at least one link".to_string());
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(LinkGroup {
            id,
            name: name.to_string(),
            icon: GroupIcon::from_name(&self.icon).to_string(),
            urls,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_builds_group() {
        let form = GroupForm {
            name: "  Dev ".to_string(),
            icon: "Code".to_string(),
            urls: "github.com\n\n  docs.rs  \n".to_string(),
        };
        let group = form.validate("g1".to_string()).expect("valid");
        assert_eq!(group.id, "g1");
        assert_eq!(group.name, "Dev");
        assert_eq!(group.icon, "Code");
        assert_eq!(group.urls, vec!["github.com", "docs.rs"]);
    }

    #[test]
    fn test_validate_reports_each_field() {
        let form = GroupForm {
            name: "   ".to_string(),
            icon: String::new(),
            urls: "\n \n".to_string(),
        };
        let errors = form.validate("g1".to_string()).expect_err("invalid");
        assert!(errors.name.is_some());
        assert!(errors.urls.is_some());
    }

    #[test]
    fn test_unknown_icon_falls_back() {
        let form = GroupForm {
            name: "Misc".to_string(),
            icon: "Sparkles?".to_string(),
            urls: "example.com".to_string(),
        };
        assert_eq!(form.validate("g".to_string()).expect("valid").icon, "Link");
    }

    #[test]
    fn test_from_group_roundtrip() {
        let group = LinkGroup {
            id: "g1".to_string(),
            name: "Dev".to_string(),
            icon: "Code".to_string(),
            urls: vec!["a.com".to_string(), "b.com".to_string()],
        };
        let form = GroupForm::from_group(&group);
        assert_eq!(form.urls, "a.com\nb.com");
        assert_eq!(form.validate("g1".to_string()).expect("valid"), group);
    }
}
