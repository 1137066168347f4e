//! Test gateways — scripted identity provider, scene generator and
//! translator that record how they were called.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use palace_core::error::DomainError;
use palace_core::gateway::{
    Credential, IdentityGateway, SceneGenerator, TranslationOutcome, Translator,
};
use palace_core::language::LanguageCode;
use palace_core::profile::UserId;

#[derive(Debug, Clone)]
struct Account {
    password: String,
    credential: Credential,
}

/// An identity provider holding accounts in memory. Duplicate sign-ups and
/// bad passwords fail the way a real provider would.
#[derive(Debug, Default)]
pub struct StubIdentityGateway {
    accounts: Mutex<HashMap<String, Account>>,
    sign_up_calls: Mutex<usize>,
    sign_in_calls: Mutex<usize>,
    unavailable: bool,
}

impl StubIdentityGateway {
    /// Creates a provider with no accounts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a provider that fails every call, as during an outage.
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    /// Registers an account up front and returns its credential.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn register(&self, email: &str, password: &str) -> Credential {
        let mut accounts = self.accounts.lock().unwrap();
        let credential = Credential {
            user_id: UserId::new(format!("uid-{}", accounts.len() + 1)),
            email: email.to_owned(),
            display_name: None,
        };
        accounts.insert(
            email.to_owned(),
            Account {
                password: password.to_owned(),
                credential: credential.clone(),
            },
        );
        credential
    }

    /// Number of `sign_up` calls received.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn sign_up_calls(&self) -> usize {
        *self.sign_up_calls.lock().unwrap()
    }

    /// Number of `sign_in` calls received.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn sign_in_calls(&self) -> usize {
        *self.sign_in_calls.lock().unwrap()
    }
}

#[async_trait]
impl IdentityGateway for StubIdentityGateway {
    async fn sign_up(&self, email: &str, password: &str) -> Result<Credential, DomainError> {
        *self.sign_up_calls.lock().unwrap() += 1;
        if self.unavailable {
            return Err(DomainError::Identity("service unavailable".into()));
        }
        if self.accounts.lock().unwrap().contains_key(email) {
            return Err(DomainError::Identity("EMAIL_EXISTS".into()));
        }
        Ok(self.register(email, password))
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Credential, DomainError> {
        *self.sign_in_calls.lock().unwrap() += 1;
        if self.unavailable {
            return Err(DomainError::Identity("service unavailable".into()));
        }
        match self.accounts.lock().unwrap().get(email) {
            Some(account) if account.password == password => Ok(account.credential.clone()),
            _ => Err(DomainError::Identity("INVALID_LOGIN_CREDENTIALS".into())),
        }
    }
}

/// A scene generator that returns a canned scene or fails, recording every
/// prompt it receives.
#[derive(Debug)]
pub struct StubSceneGenerator {
    reply: Option<String>,
    prompts: Mutex<Vec<String>>,
}

impl StubSceneGenerator {
    /// Generator that answers every prompt with `scene`.
    #[must_use]
    pub fn replying(scene: impl Into<String>) -> Self {
        Self {
            reply: Some(scene.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Generator that fails every prompt as if the quota were exhausted.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            reply: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Returns the prompts received so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl SceneGenerator for StubSceneGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, DomainError> {
        self.prompts.lock().unwrap().push(prompt.to_owned());
        self.reply
            .clone()
            .ok_or_else(|| DomainError::GenerationUnavailable("HTTP 429: quota exhausted".into()))
    }
}

/// A translator returning a scripted outcome, recording each request.
#[derive(Debug)]
pub struct StubTranslator {
    outcome: TranslationOutcome,
    requests: Mutex<Vec<(String, LanguageCode)>>,
}

impl StubTranslator {
    /// Translator that always translates to `text`.
    #[must_use]
    pub fn replying(text: impl Into<String>) -> Self {
        Self {
            outcome: TranslationOutcome::Translated(text.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Translator that always fails with `reason`.
    #[must_use]
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            outcome: TranslationOutcome::Failed(reason.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Returns the `(text, target)` pairs received so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn requests(&self) -> Vec<(String, LanguageCode)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Translator for StubTranslator {
    async fn translate(&self, text: &str, target: LanguageCode) -> TranslationOutcome {
        self.requests
            .lock()
            .unwrap()
            .push((text.to_owned(), target));
        self.outcome.clone()
    }
}
