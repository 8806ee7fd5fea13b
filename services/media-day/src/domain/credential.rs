// Authorizationヘッダーの資格情報
//
// ヘッダー値は「書類番号:名前」をbase64エンコードしたもの。
// 先頭に「Basic 」が付いていてもよい。

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use thiserror::Error;

const BASIC_SCHEME_PREFIX: &str = "Basic ";

/// 資格情報デコードのエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CredentialError {
    /// ヘッダーが存在しない、または空
    #[error("Missing authorization header")]
    Missing,

    /// base64としてデコードできない
    #[error("Invalid base64 encoding: {0}")]
    InvalidBase64(String),

    /// デコード結果がUTF-8ではない
    #[error("Decoded credential is not valid UTF-8")]
    InvalidUtf8,

    /// 区切りのコロンがない
    #[error("Invalid authorization format: missing colon separator")]
    MissingSeparator,

    /// 書類番号または名前が空
    #[error("Invalid authorization format: empty document or name")]
    EmptyPart,
}

/// デコード済みの資格情報
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    /// 身分証明書番号（コロンの前）
    pub document: String,
    /// ユーザー名（コロンの後、usersテーブルのキー）
    pub name: String,
}

impl Credential {
    /// Authorizationヘッダー値をデコードする
    ///
    /// # 処理フロー
    /// 1. 「Basic 」接頭辞があれば取り除く
    /// 2. base64デコードしてUTF-8として解釈
    /// 3. 最初のコロンで書類番号と名前に分割（名前側にコロンが残ってもよい）
    /// 4. どちらかが空ならエラー
    pub fn decode(header: &str) -> Result<Self, CredentialError> {
        let header = header.trim();
        if header.is_empty() {
            return Err(CredentialError::Missing);
        }

        let encoded = header
            .strip_prefix(BASIC_SCHEME_PREFIX)
            .unwrap_or(header)
            .trim();

        let bytes = BASE64
            .decode(encoded)
            .map_err(|e| CredentialError::InvalidBase64(e.to_string()))?;
        let decoded = String::from_utf8(bytes).map_err(|_| CredentialError::InvalidUtf8)?;

        let (document, name) = decoded
            .split_once(':')
            .ok_or(CredentialError::MissingSeparator)?;

        if document.is_empty() || name.is_empty() {
            return Err(CredentialError::EmptyPart);
        }

        Ok(Self {
            document: document.to_string(),
            name: name.to_string(),
        })
    }

    /// 資格情報をヘッダー値にエンコードする（クライアント側と同じ形式）
    pub fn encode(&self) -> String {
        BASE64.encode(format!("{}:{}", self.document, self.name))
    }
}
