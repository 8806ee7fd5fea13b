// 正準名（CanonicalName）生成
//
// 氏名などの自由記述テキストを、ASCII小文字・アンダースコア区切りの
// 識別子に変換する。名簿間の結合キーとS3オブジェクトパスの両方に使われる。
// 一意性は保証しない（同姓同名は同じ正準名になる）。

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// 名簿に紛れ込む「N/A」トークン（大文字小文字を区別しない、単語境界あり）
static NOT_AVAILABLE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bN/A\b").expect("N/Aトークンの正規表現が不正"));

/// 連続するアンダースコア
static REPEATED_UNDERSCORES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_+").expect("アンダースコアの正規表現が不正"));

/// テキストから「N/A」トークンを取り除く
///
/// 前後の空白は残すため、呼び出し側で必要に応じてtrimすること。
pub fn strip_not_available(text: &str) -> String {
    NOT_AVAILABLE_TOKEN.replace_all(text, "").into_owned()
}

/// アクセント付き文字などを素のASCIIに変換する
///
/// NFKD分解した上で非ASCIIのコードポイントを捨てる。
/// 「é」は「e」になり、分解できない文字（漢字など）は消える。
pub fn to_ascii(text: &str) -> String {
    text.nfkd().filter(char::is_ascii).collect()
}

/// テキストを正準形式に変換する
///
/// # 処理順
/// 1. 「N/A」トークンを除去
/// 2. ASCIIに変換（変換で境界が生まれた「N/A」も除去）
/// 3. 前後の空白を除去
/// 4. 小文字化
/// 5. 半角スペースをアンダースコアに置換
/// 6. 連続するアンダースコアを1つにまとめる
///
/// 冪等であり、`to_canonical(&to_canonical(x)) == to_canonical(x)`が成り立つ。
pub fn to_canonical(text: &str) -> String {
    let without_token = strip_not_available(text);
    let ascii = strip_not_available(&to_ascii(&without_token));
    let lowered = ascii.trim().to_ascii_lowercase().replace(' ', "_");

    REPEATED_UNDERSCORES.replace_all(&lowered, "_").into_owned()
}

/// 名（Nombre）と姓（Apellidos）から正準名を生成する
///
/// 欠損値は空文字として扱い、連結後に空白を1つにまとめてから正準化する。
pub fn canonical_full_name(given_name: Option<&str>, family_name: Option<&str>) -> String {
    let joined = format!(
        "{} {}",
        given_name.unwrap_or_default().trim(),
        family_name.unwrap_or_default().trim()
    );
    let collapsed = joined.split_whitespace().collect::<Vec<_>>().join(" ");

    to_canonical(&collapsed)
}
