// ドメイン層モジュール
pub mod attendee;
pub mod canonical_name;
pub mod credential;
pub mod diagnostics;
pub mod identity_document;
pub mod media_day_row;
pub mod member;
pub mod policy;
pub mod role;
pub mod roster;
pub mod statistics;
pub mod tutor_field;
pub mod user_record;

// 再エクスポート
pub use attendee::Attendee;
pub use canonical_name::{canonical_full_name, to_canonical};
pub use credential::{Credential, CredentialError};
pub use diagnostics::PipelineWarning;
pub use identity_document::{normalize_document, IdentityDocuments};
pub use media_day_row::MediaDayPlayerRow;
pub use member::{parse_birth_date, Member};
pub use policy::{AuthorizerResponse, Effect};
pub use role::{is_player_role, is_tutor_role};
pub use roster::{
    Guardian, PlayerCandidate, ResolvedPlayer, TutorRecord, TutorSlot, NOT_FOUND_SENTINEL,
};
pub use statistics::{percentage, PipelineStatistics};
pub use tutor_field::{parse_tutor_field, TutorNames};
pub use user_record::{photo_keys, UserRecord};
