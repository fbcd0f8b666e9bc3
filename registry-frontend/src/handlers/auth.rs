use askama::Template;
use axum::response::{IntoResponse, Redirect};

use crate::routes::{Navigation, LOGIN};

pub struct ProviderLink {
    pub label: String,
    pub url: String,
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub company_name: String,
    pub providers: Vec<ProviderLink>,
}

fn label(provider: &str) -> String {
    let mut chars = provider.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub async fn login_page(Navigation { context }: Navigation) -> impl IntoResponse {
    let runtime = context.runtime();

    LoginTemplate {
        providers: runtime
            .oauth_providers
            .iter()
            .map(|provider| ProviderLink {
                label: label(provider),
                url: runtime.login_url(provider),
            })
            .collect(),
        company_name: runtime.company_name,
    }
}

/// The logout route's guard always redirects; reaching the handler means the
/// guard was bypassed, so send the browser to the login page as well.
pub async fn logout_handler(_navigation: Navigation) -> impl IntoResponse {
    Redirect::to(LOGIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_label() {
        assert_eq!(label("github"), "Github");
        assert_eq!(label(""), "");
    }
}
