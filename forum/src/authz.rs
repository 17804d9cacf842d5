use crate::identity::models::identity::Identity;

/// A document that belongs to the identity that created it.
pub trait Owned {
    const KIND: &'static str;

    fn owner_id(&self) -> i32;
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("identity {identity_id} does not own {kind} owned by {owner_id}")]
pub struct AuthorizationDenied {
    pub kind: &'static str,
    pub identity_id: i32,
    pub owner_id: i32,
}

/// The single ownership check in front of every edit and delete.
pub fn authorize_owner<E: Owned>(entity: &E, identity: &Identity) -> Result<(), AuthorizationDenied> {
    if entity.owner_id() == identity.id {
        return Ok(());
    }

    tracing::warn!(
        kind = E::KIND,
        identity_id = identity.id,
        owner_id = entity.owner_id(),
        "Denied mutation by non-owner"
    );

    Err(AuthorizationDenied {
        kind: E::KIND,
        identity_id: identity.id,
        owner_id: entity.owner_id(),
    })
}
