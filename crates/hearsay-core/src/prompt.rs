//! Prompt construction for the external text-generation service
//!
//! Only the tagged-section shape of the synthesis response is contractual;
//! the wording itself follows the interview-analysis playbook and may change
//! freely.

use crate::types::Chunk;

pub const ANALYST_SYSTEM_PROMPT: &str = "あなたはリーガルテック領域の調査アナリストです。\
インタビュー会話から立法・制度設計に影響する論点を掘り起こしてください。";

pub const SYNTHESIS_SYSTEM_PROMPT: &str = "あなたは政策立案担当者向けに論点を整理する専門家です。\
複数のインタビュー要約をもとに、制度の隙間や暗黙の前提を明確化してください。";

/// User prompt analyzing one transcript chunk.
pub fn build_chunk_prompt(index: usize, total: usize, chunk: &Chunk) -> String {
    let mut sessions: Vec<&str> = Vec::new();
    for utterance in &chunk.utterances {
        if !sessions.contains(&utterance.session_id.as_str()) {
            sessions.push(&utterance.session_id);
        }
    }
    let sessions = sessions.join("、");

    format!(
        "以下はインタビューログの抜粋（{number}/{total}、対象セッション: {sessions}）です。\
テキストを読み込み、以下をMarkdownでまとめてください。\n\
\n\
- インタビュー対象者の主な主張・懸念点\n\
- 法整備の観点で重要になりそうな論点\n\
- インタビュアー／対象者が暗黙に前提としているルールや慣行\n\
- 現行法や制度では拾いきれていない可能性があるポイント\n\
- 追加で調査すべき事項や確認が必要な前提\n\
\n\
出力は「## 抜粋 {number}」配下に箇条書きを含む読みやすいMarkdownで記載してください。\n\
\n\
---\n\
{text}\n",
        number = index + 1,
        total = total,
        sessions = sessions,
        text = chunk.text,
    )
}

/// User prompt merging one batch of analysis summaries into a single one.
pub fn build_merge_prompt(batch: &[String]) -> String {
    let joined = batch.join("\n\n---\n\n");
    format!(
        "以下は複数の分析結果です。重要な論点・懸念点・暗黙の前提を漏らさないように、\
1つのMarkdown要約に統合してください。重複する内容はまとめ、矛盾する内容は両論併記してください。\n\
\n\
---\n\
{joined}\n"
    )
}

/// Final synthesis prompt embedding the tagged-section contract.
pub fn build_synthesis_prompt(summaries: &[String], reference_materials: &str) -> String {
    let joined = summaries.join("\n\n");
    let references = if reference_materials.trim().is_empty() {
        String::new()
    } else {
        format!(
            "\n以下は参考資料です。分析の裏付けに活用してください。\n\n{reference_materials}\n"
        )
    };

    format!(
        "以下は各セッションの分析結果です。全体を俯瞰し、共通するパターンや見落とされがちな論点を抽出してください。\n\
結果は以下の3セクションを日本語Markdownで生成してください。\n\
\n\
[overall_summary]\n\
- 全体サマリー（複数セッションを通じた主要な洞察）\n\
[/overall_summary]\n\
[overlooked_points]\n\
- 法整備の観点で見落とされがちなポイント（暗黙の前提や制度の隙間を含む）\n\
[/overlooked_points]\n\
[suggestions]\n\
- 改善提案・追加で検討すべき示唆\n\
[/suggestions]\n\
{references}\
\n\
---\n\
{joined}\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Utterance;
    use chrono::{TimeZone, Utc};

    fn chunk_for(sessions: &[&str]) -> Chunk {
        let utterances: Vec<Utterance> = sessions
            .iter()
            .enumerate()
            .map(|(i, s)| Utterance {
                session_id: s.to_string(),
                timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, i as u32).unwrap(),
                role: "subject".to_string(),
                content: format!("発言{i}"),
            })
            .collect();
        let text = utterances
            .iter()
            .map(Utterance::render_line)
            .collect::<Vec<_>>()
            .join("\n");
        Chunk {
            text,
            utterances,
            token_estimate: 0,
            oversized: false,
        }
    }

    #[test]
    fn test_chunk_prompt_numbers_and_sessions() {
        let chunk = chunk_for(&["s1", "s2", "s1"]);
        let prompt = build_chunk_prompt(0, 4, &chunk);
        assert!(prompt.contains("1/4"));
        assert!(prompt.contains("s1、s2"));
        assert!(prompt.contains("## 抜粋 1"));
        assert!(prompt.contains(&chunk.text));
    }

    #[test]
    fn test_merge_prompt_includes_every_summary() {
        let batch = vec!["要約A".to_string(), "要約B".to_string()];
        let prompt = build_merge_prompt(&batch);
        assert!(prompt.contains("要約A"));
        assert!(prompt.contains("要約B"));
    }

    #[test]
    fn test_synthesis_prompt_carries_tag_contract() {
        let prompt = build_synthesis_prompt(&["要約".to_string()], "");
        for tag in ["overall_summary", "overlooked_points", "suggestions"] {
            assert!(prompt.contains(&format!("[{tag}]")));
            assert!(prompt.contains(&format!("[/{tag}]")));
        }
        assert!(!prompt.contains("参考資料"));
    }

    #[test]
    fn test_synthesis_prompt_appends_references_when_present() {
        let prompt = build_synthesis_prompt(&["要約".to_string()], "# 議事録\n\n本文");
        assert!(prompt.contains("参考資料"));
        assert!(prompt.contains("# 議事録"));
    }
}
