use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::models::User;

/// The actor making the request, if any.
///
/// Whatever authenticates requests upstream stores the resolved [`User`] in
/// the request extensions; this extractor only reads it back. It never fails:
/// a request without a user yields an anonymous identity, and the policy
/// engine decides what an anonymous actor may do (nothing).
#[derive(Debug, Clone, Default)]
pub struct Identity(Option<User>);

impl Identity {
    pub fn user(&self) -> Option<&User> {
        self.0.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.0.is_some()
    }

    pub fn into_inner(self) -> Option<User> {
        self.0
    }
}

impl From<User> for Identity {
    fn from(user: User) -> Self {
        Identity(Some(user))
    }
}

impl FromRequest for Identity {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(Identity(req.extensions().get::<User>().cloned())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::dev::Payload;
    use actix_web::test;

    #[actix_rt::test]
    async fn test_identity_extractor_reads_user() {
        let req = test::TestRequest::default().to_http_request();
        req.extensions_mut().insert(User::new(123, "alice"));

        let mut payload = Payload::None;
        let identity = Identity::from_request(&req, &mut payload).await.unwrap();
        assert!(identity.is_authenticated());
        assert_eq!(identity.user().map(|u| u.id), Some(123));
    }

    #[actix_rt::test]
    async fn test_identity_extractor_without_user_is_anonymous() {
        let req = test::TestRequest::default().to_http_request();

        let mut payload = Payload::None;
        let identity = Identity::from_request(&req, &mut payload).await.unwrap();
        assert!(!identity.is_authenticated());
        assert!(identity.into_inner().is_none());
    }
}
