pub mod entity;
pub mod company;
pub mod draft;

pub use company::{CompanyInfo, CompanyInfoPatch};
pub use draft::{CompanyInfoDraft, EntityDraft, FieldGroup};
pub use entity::{
    Address, ContactPerson, Entity, EntityPatch, EntityStatus, EntityType, NewEntity, RosterItem,
};
