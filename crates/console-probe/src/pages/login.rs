use crate::locators::{login, AuthType};
use crate::page::BasePage;
use crate::result::ProbeResult;
use tracing::info;

/// OpenShift OAuth login page
#[derive(Debug, Clone)]
pub struct LoginPage {
    base: BasePage,
}

impl LoginPage {
    /// Create the page object
    #[must_use]
    pub fn new(base: BasePage) -> Self {
        Self { base }
    }

    /// Navigate to the configured console URL; the console redirects to OAuth
    pub async fn goto(&self) -> ProbeResult<()> {
        let url = self.base.config().base_url.clone();
        self.base.goto(&url).await
    }

    /// Wait for an OAuth URL, then report whether the provider chooser is visible
    pub async fn verify_on_login_page(&self) -> ProbeResult<bool> {
        self.base.wait_for_url_contains("oauth", None).await?;
        self.base.is_visible(login::LOGIN_WITH_AUTH, None).await
    }

    /// Pick an identity provider by name (`kube:admin` or `htpasswd`, any case)
    pub async fn choose_login_auth_type(&self, auth_type: &str) -> ProbeResult<AuthType> {
        let kind: AuthType = auth_type.parse()?;
        self.base.click_element(kind.locator(), None).await?;
        info!(provider = %kind, "identity provider selected");
        Ok(kind)
    }

    /// Submit the configured credentials
    pub async fn login(&self) -> ProbeResult<()> {
        let config = self.base.config();
        self.base
            .fill_input(login::USERNAME_INPUT, &config.username, None)
            .await?;
        self.base
            .fill_input(login::PASSWORD_INPUT, config.password(), None)
            .await?;
        self.base.click_element(login::LOGIN_BUTTON, None).await?;
        info!(user = %config.username, "credentials submitted");
        Ok(())
    }
}
