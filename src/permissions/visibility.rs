//! Capability-gated visibility.

use jiff::Timestamp;

use crate::permissions::PermissionGate;

/// A console affordance tagged with the capability required to show it.
pub trait CapabilityGated {
    /// Capability required to render this item; `None` renders always.
    fn required_capability(&self) -> Option<&str>;
}

impl PermissionGate {
    /// Filter `items` down to those the current session may see.
    ///
    /// Untagged items are always visible; tagged items are hidden unless the
    /// session's snapshot grants their capability.
    pub fn visible<'a, T: CapabilityGated>(
        &self,
        items: &'a [T],
        now: Timestamp,
    ) -> Vec<&'a T> {
        items
            .iter()
            .filter(|item| {
                item.required_capability()
                    .is_none_or(|capability| self.has(capability, now))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        auth::{AuthService, Password},
        test::TestContext,
    };

    use super::*;

    struct NavItem {
        label: &'static str,
        requires: Option<&'static str>,
    }

    impl CapabilityGated for NavItem {
        fn required_capability(&self) -> Option<&str> {
            self.requires
        }
    }

    const NAV: [NavItem; 3] = [
        NavItem {
            label: "Dashboard",
            requires: None,
        },
        NavItem {
            label: "Users",
            requires: Some("manage_users"),
        },
        NavItem {
            label: "Draws",
            requires: Some("run_draws"),
        },
    ];

    fn labels<'a>(items: &[&'a NavItem]) -> Vec<&'a str> {
        items.iter().map(|item| item.label).collect()
    }

    #[tokio::test]
    async fn only_untagged_items_show_without_a_session() {
        let ctx = TestContext::new();

        let visible = ctx.gate.visible(&NAV, ctx.now);

        assert_eq!(labels(&visible), ["Dashboard"]);
    }

    #[tokio::test]
    async fn tagged_items_follow_the_snapshot() -> TestResult {
        let ctx = TestContext::new();

        ctx.auth
            .login("dana@example.com", &Password::new("p"), ctx.now)
            .await?;

        let visible = ctx.gate.visible(&NAV, ctx.now);

        assert_eq!(labels(&visible), ["Dashboard", "Users"]);

        Ok(())
    }
}
