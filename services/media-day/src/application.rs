// アプリケーション層モジュール
pub mod attendance_matcher;
pub mod authorizer_handler;
pub mod content_handler;
pub mod partition;
pub mod player_data_uploader;
pub mod players_tutors_pipeline;
pub mod tutor_resolver;

// 再エクスポート
pub use attendance_matcher::{
    match_attendance, select_player_attendees, AttendanceMatch, MatchedAttendee, PlayerIndex,
};
pub use authorizer_handler::AuthorizerHandler;
pub use content_handler::{internal_error_response, json_error_response, ContentHandler};
pub use partition::{partition_members, PartitionedMembers};
pub use player_data_uploader::{generate_user_records, PlayerDataUploader, UploadError};
pub use players_tutors_pipeline::{run_players_tutors, PipelineReport};
pub use tutor_resolver::{resolve_tutors, ResolvedRoster, TutorLookup};
