pub const TRANSLATION_PROMPT_TEMPLATE: &str = "コマンドラインで受け取った内容を日本語に翻訳してください。\
     コードや記号はそのまま保持してください。\
     結果のみを翻訳した状態で、元の形式を保持したまま出力してください。\
     コードブロックなども不要です。：\n\n{input}";

#[allow(clippy::literal_string_with_formatting_args)]
pub fn build_prompt(input: &str) -> String {
    // {input} is a placeholder for string replacement, not a format argument
    TRANSLATION_PROMPT_TEMPLATE.replace("{input}", input)
}
