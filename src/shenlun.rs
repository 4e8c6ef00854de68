//! 申论 rewriter.
//!
//! Turns an episode's title and synopsis into structured interview study
//! material via the DeepSeek chat-completions API. The rewrite never fails:
//! without an API key, or on any transport/status/shape problem, it degrades
//! to the deterministic [`fallback_template`], and the outcome records which
//! path produced the text.

use crate::config::Config;
use crate::utils::{truncate_chars, truncate_for_log};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::{info, instrument, warn};

const REWRITE_TIMEOUT: Duration = Duration::from_secs(90);
const MAX_TOKENS: u32 = 2048;

/// Why a rewrite degraded to the fallback template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// No generation-API key is configured.
    NoApiKey,
    /// The HTTP request itself failed (connect, timeout, body read).
    RequestFailed(String),
    /// The API answered with a non-2xx status.
    BadStatus(u16),
    /// The response body did not contain a completion.
    MalformedResponse,
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoApiKey => write!(f, "no API key configured"),
            Self::RequestFailed(e) => write!(f, "request failed: {e}"),
            Self::BadStatus(code) => write!(f, "API returned status {code}"),
            Self::MalformedResponse => write!(f, "response had no completion"),
        }
    }
}

/// Outcome of a rewrite: the live completion, or the fallback text together
/// with the reason the live path was not used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rewrite {
    Generated(String),
    Fallback {
        text: String,
        reason: FallbackReason,
    },
}

impl Rewrite {
    /// The article text, whichever path produced it. Always non-empty.
    pub fn text(&self) -> &str {
        match self {
            Self::Generated(text) => text,
            Self::Fallback { text, .. } => text,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: String,
}

/// Rewrite episode text into 申论 study material.
///
/// One POST with a 90-second timeout; every failure mode collapses into
/// [`Rewrite::Fallback`] rather than an error.
#[instrument(level = "info", skip_all, fields(%title))]
pub async fn rewrite(client: &Client, config: &Config, title: &str, content: &str) -> Rewrite {
    let Some(key) = config.deepseek_api_key.as_deref() else {
        info!("No DeepSeek key configured; using fallback template");
        return Rewrite::Fallback {
            text: fallback_template(title, content),
            reason: FallbackReason::NoApiKey,
        };
    };

    match try_rewrite(client, config, key, title, content).await {
        Ok(text) => {
            info!(chars = text.chars().count(), "Rewrite generated");
            Rewrite::Generated(text)
        }
        Err(reason) => {
            warn!(%reason, "Rewrite degraded to fallback template");
            Rewrite::Fallback {
                text: fallback_template(title, content),
                reason,
            }
        }
    }
}

async fn try_rewrite(
    client: &Client,
    config: &Config,
    key: &str,
    title: &str,
    content: &str,
) -> Result<String, FallbackReason> {
    let request = ChatRequest {
        model: config.model.clone(),
        messages: vec![Message {
            role: "user".to_string(),
            content: build_prompt(title, content),
        }],
        max_tokens: MAX_TOKENS,
    };

    let response = client
        .post(&config.chat_url)
        .bearer_auth(key)
        .json(&request)
        .timeout(REWRITE_TIMEOUT)
        .send()
        .await
        .map_err(|e| FallbackReason::RequestFailed(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FallbackReason::BadStatus(status.as_u16()));
    }

    let body = response
        .text()
        .await
        .map_err(|e| FallbackReason::RequestFailed(e.to_string()))?;

    extract_completion(&body).ok_or_else(|| {
        warn!(body_preview = %truncate_for_log(&body, 300), "Completion missing from response");
        FallbackReason::MalformedResponse
    })
}

/// Pull the first completion's text out of a chat response body.
///
/// Returns `None` for unparsable bodies, an empty `choices` array, or an
/// empty completion, so the caller always has non-empty text to fall back on.
pub fn extract_completion(body: &str) -> Option<String> {
    let response = serde_json::from_str::<ChatResponse>(body).ok()?;
    response
        .choices
        .into_iter()
        .next()
        .map(|c| c.message.content)
        .filter(|text| !text.is_empty())
}

/// The canonical 申论/面试 prompt with episode title and content interpolated.
pub fn build_prompt(title: &str, content: &str) -> String {
    format!(
        r#"请基于最新央视《焦点访谈》节目内容，提炼公务员面试高频考点素材，形成结构化积累内容，需满足以下要求：
一、标题要求

精准概括核心话题，体现面试考点属性，15字以内，精准对应节目主题。

二、内容结构（分类型适配，适配面试答题逻辑，简洁精炼、便于口头表述）

类型一：常规事件/话题类（含问题、对策导向）

- 【背景引入】：2-3句话说明事件/话题的社会背景、政策语境，关联近期国家大政方针（如“在‘十四五’规划推进背景下”“围绕高质量发展要求”）最后一句话表达观点需准确、全面；
答题可用角度：综合分析题开篇、现象类题目引入。

- 【话题意义】：从政府职能、群众利益、社会发展、企业发展等维度，2-3句话阐述话题价值，可引用领导人讲话（如“习近平总书记强调的‘以人民为中心的发展思想’”）或《政府工作报告》等政策文件精神；
答题可用角度：提升答题站位、强化观点说服力。

- 【问题分析】：提炼3-4个核心问题，结合节目案例，体现问题普遍性、关联性（如“政策落地‘最后一公里’梗阻”“监管协同机制不健全”）；
答题可用角度：综合分析题问题剖析、应急应变题溯源。

- 【对策建议】：提出3-4条可操作对策，对应问题且符合政府工作逻辑（如“强化部门联动，建立‘清单式’监管机制”“完善基层治理体系，推动资源下沉”），可参考已有政策实践；
答题可用角度：解决问题类题目、对策类综合分析题核心作答。

- 【总结升华】：2-3句话升华主题，关联国家发展战略（如“推进国家治理体系和治理能力现代化”“实现共同富裕”），体现公务员视角与担当；
答题可用角度：各类题目结尾收尾、提升答题格局。

类型二：全好政策启示类（无负面问题，侧重经验提炼）

提炼3-4个核心启示，采用“序号+启示观点+观点意义+启示做法”结构，贴合政府工作实际，便于转化为面试答题要点：

- 序号：一、二、三、四（清晰罗列，适配面试答题逻辑）；

- 启示观点：精准提炼政策核心经验，简洁明确（如“坚持党建引领是政策落地的关键”）；

- 观点意义：阐述该启示对政府工作、社会发展、群众利益、个人工作、工作机制的价值（1句话即可）；

- 启示做法：结合政府工作实际，提出可复制、可推广的落实举措（1-2句话，具体可行）；
答题可用角度：综合分析题经验总结、计划组织题思路借鉴、岗位匹配题理念表达。

三、附加通用要求

1. 语言必须适配面试口头表达，避免过度书面化，兼顾规范性与流畅性；

2. 尽量体现更多能够用于考生积累的用词或语句，例如政府专业名词、做法名词等；

3. 结尾标注“高频考点标签”，便于分类积累；

4. 意义、问题、对策都需要全面且有条理，内容丰富。

四、输入内容要求

需提供：1. 节目标题：{title}；2. 节目核心内容（提炼关键事件、政策、案例、观点）：{content}；3. 可标注节目类型（常规类/政策启示类，未标注则默认按常规类处理）。

五、输出格式

【标题】（话题领域）+ 答题可用场景
【背景引入】（内容）+ 答题可用角度
【话题意义】（内容）+ 答题可用角度
【问题分析/政策启示】（对应类型内容）+ 答题可用角度
【对策建议/（启示类无此部分）】（内容）+ 答题可用角度
【总结升华】（内容）+ 答题可用角度
【高频考点标签】#XXX #XXX #XXX #XXX

语言口语化适配面试表达，避免过于书面化表述
尽量体现更多能够用于考生积累的用词或语句，例如政府专业名词、做法名词等。
结尾标注“高频考点标签”（如 #面试综合分析 #民生治理 #政策落实）
"#,
        title = title,
        content = content
    )
}

/// Deterministic study article used when no live completion is available.
///
/// The background section is exactly the first 200 characters of `content`;
/// every other section is a static placeholder.
pub fn fallback_template(title: &str, content: &str) -> String {
    let background = truncate_chars(content, 200);
    format!(
        r#"【标题】{title}

【背景引入】
{background}

【问题分析】
详见原节目内容。

【话题意义】
（内容）+ 答题可用角度

【对策建议】
建议观看完整节目了解详情。

【总结升华】
关注时事，提升申论思维。

【话题标签】#申论 #焦点访谈 #时事热点 #公务员考试
"#
    )
}
