// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::domain::models::crawl::{AnalysisOutcome, CrawlOutcome, DiscoveredLink};
use crate::domain::models::tool::{PricingType, SocialLinks};
use crate::utils::json_extract;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

/// HTML响应中需要剥离的已知前导语
const HTML_PREAMBLES: [&str; 4] = [
    "Voici la description :",
    "Voici la description HTML :",
    "Voici le code HTML :",
    "Here is the HTML:",
];

/// 文本生成器特质
///
/// 分析服务通过该接口调用生成式文本API，测试中以固定
/// 响应的模拟实现替换
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// 对提示词生成文本
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// 分析服务
///
/// 构建各端点的法语提示词，调用生成式文本API，并把自由
/// 文本响应解码为结构化结果。API失败返回 `None`（记录日志，
/// 不中止爬取）；解码失败返回 `Raw` 变体而不是 `None`。
pub struct AnalysisService {
    generator: Arc<dyn TextGenerator>,
}

impl AnalysisService {
    /// 创建新的分析服务实例
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// 通用内容分析
    ///
    /// 从爬取文本推导名称、摘要、功能、受众和分类
    pub async fn analyze_content(&self, outcome: &CrawlOutcome) -> Option<AnalysisOutcome> {
        self.run(&build_content_prompt(outcome)).await
    }

    /// 定价分析
    pub async fn analyze_pricing(&self, outcome: &CrawlOutcome) -> Option<AnalysisOutcome> {
        self.run(&build_pricing_prompt(outcome)).await
    }

    /// 社交与联盟链接分析
    pub async fn analyze_links(
        &self,
        outcome: &CrawlOutcome,
        social: &SocialLinks,
        affiliate_candidates: &[DiscoveredLink],
    ) -> Option<AnalysisOutcome> {
        self.run(&build_links_prompt(outcome, social, affiliate_candidates))
            .await
    }

    /// 生成详细描述HTML
    ///
    /// 剥离已知前导语和围栏；响应不含任何标签时把转义后的
    /// 文本包进 `<p>`
    pub async fn generate_description(&self, outcome: &CrawlOutcome) -> Option<String> {
        let text = match self.generator.generate(&build_description_prompt(outcome)).await {
            Ok(text) => text,
            Err(e) => {
                warn!("LLM description generation failed: {}", e);
                return None;
            }
        };
        Some(clean_description_html(&text))
    }

    async fn run(&self, prompt: &str) -> Option<AnalysisOutcome> {
        match self.generator.generate(prompt).await {
            Ok(text) => Some(decode_analysis(&text)),
            Err(e) => {
                warn!("LLM analysis failed: {}", e);
                None
            }
        }
    }
}

/// 解码LLM自由文本响应
///
/// JSON提取成功 → `Structured`，否则保留原始文本
pub fn decode_analysis(text: &str) -> AnalysisOutcome {
    match json_extract::extract_json(text) {
        Some(value) => AnalysisOutcome::Structured(value),
        None => AnalysisOutcome::Raw(text.to_string()),
    }
}

/// 通用内容分析提示词
pub fn build_content_prompt(outcome: &CrawlOutcome) -> String {
    format!(
        "Tu es l'assistant d'un annuaire d'outils d'intelligence artificielle pour la vidéo.\n\
         Analyse le contenu suivant, extrait du site \"{title}\" ({url}), et remplis la fiche de l'outil.\n\
         Réponds UNIQUEMENT avec un objet JSON de la forme exacte :\n\
         {{\"name\": \"...\", \"summary\": \"...\", \"description\": \"...\", \"features\": [\"...\"], \
         \"targetAudience\": [\"...\"], \"categories\": [\"...\"], \"tags\": [\"...\"]}}\n\
         Toutes les valeurs doivent être rédigées en français.\n\n\
         Contenu du site :\n{content}",
        title = outcome.title.as_deref().unwrap_or("inconnu"),
        url = outcome.final_url,
        content = outcome.content,
    )
}

/// 定价分析提示词
///
/// 定价类型作为结构化字段向模型索取，而不是事后从自由
/// 文本里嗅探关键词
pub fn build_pricing_prompt(outcome: &CrawlOutcome) -> String {
    format!(
        "Tu es l'assistant d'un annuaire d'outils d'intelligence artificielle pour la vidéo.\n\
         Analyse les informations tarifaires du site \"{title}\" ({url}).\n\
         Réponds UNIQUEMENT avec un objet JSON de la forme exacte :\n\
         {{\"pricingType\": \"FREE\" | \"FREEMIUM\" | \"PAID\", \"pricingSummary\": \"...\", \
         \"pricingDetailsHtml\": \"<ul>...</ul>\"}}\n\
         pricingType doit valoir FREE si l'outil est entièrement gratuit, FREEMIUM s'il propose \
         une offre gratuite et des offres payantes, PAID s'il est uniquement payant.\n\
         pricingDetailsHtml doit être un fragment HTML en français listant les offres et leurs prix.\n\n\
         Contenu du site :\n{content}",
        title = outcome.title.as_deref().unwrap_or("inconnu"),
        url = outcome.final_url,
        content = outcome.content,
    )
}

/// 详细描述提示词
pub fn build_description_prompt(outcome: &CrawlOutcome) -> String {
    format!(
        "Tu es le rédacteur d'un annuaire d'outils d'intelligence artificielle pour la vidéo.\n\
         Rédige en français une description détaillée de l'outil \"{title}\" ({url}) à partir du \
         contenu ci-dessous.\n\
         Réponds UNIQUEMENT avec un fragment HTML utilisant <h2>, <p>, <ul> et <li>, sans balise \
         <html> ni <body>, sans phrase d'introduction.\n\n\
         Contenu du site :\n{content}",
        title = outcome.title.as_deref().unwrap_or("inconnu"),
        url = outcome.final_url,
        content = outcome.content,
    )
}

/// 社交与联盟链接提示词
pub fn build_links_prompt(
    outcome: &CrawlOutcome,
    social: &SocialLinks,
    affiliate_candidates: &[DiscoveredLink],
) -> String {
    let candidates = affiliate_candidates
        .iter()
        .map(|link| format!("- {} ({})", link.url, link.text))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Tu es l'assistant d'un annuaire d'outils d'intelligence artificielle pour la vidéo.\n\
         Pour le site \"{title}\" ({url}), identifie les profils sociaux officiels et le programme \
         d'affiliation éventuel.\n\
         Liens sociaux détectés : twitter={twitter}, linkedin={linkedin}, youtube={youtube}, \
         instagram={instagram}.\n\
         Liens candidats au programme d'affiliation :\n{candidates}\n\
         Réponds UNIQUEMENT avec un objet JSON de la forme exacte :\n\
         {{\"twitterUrl\": \"...\" | null, \"linkedinUrl\": \"...\" | null, \"youtubeUrl\": \"...\" | null, \
         \"instagramUrl\": \"...\" | null, \"hasAffiliateProgram\": true | false, \
         \"affiliateUrl\": \"...\" | null, \"notes\": \"...\"}}\n\n\
         Contenu du site :\n{content}",
        title = outcome.title.as_deref().unwrap_or("inconnu"),
        url = outcome.final_url,
        twitter = social.twitter_url.as_deref().unwrap_or("aucun"),
        linkedin = social.linkedin_url.as_deref().unwrap_or("aucun"),
        youtube = social.youtube_url.as_deref().unwrap_or("aucun"),
        instagram = social.instagram_url.as_deref().unwrap_or("aucun"),
        candidates = if candidates.is_empty() {
            "aucun".to_string()
        } else {
            candidates
        },
        content = outcome.content,
    )
}

/// 从定价分析结果推断定价类型
///
/// 结构化结果读取 `pricingType` 字段；`Raw` 降级时退回
/// 关键词启发式
pub fn infer_pricing_type(analysis: &AnalysisOutcome) -> Option<PricingType> {
    match analysis {
        AnalysisOutcome::Structured(value) => value
            .get("pricingType")
            .and_then(|v| v.as_str())
            .and_then(|s| s.parse().ok()),
        AnalysisOutcome::Raw(text) => keyword_pricing_type(text),
    }
}

/// 定价类型关键词启发式
///
/// 仅作为JSON解码失败时的降级路径
fn keyword_pricing_type(text: &str) -> Option<PricingType> {
    let lower = text.to_lowercase();
    let has_free = lower.contains("gratuit") || lower.contains("free");
    let has_paid = lower.contains("payant")
        || lower.contains("paid")
        || lower.contains("€")
        || lower.contains("$")
        || lower.contains("/mois")
        || lower.contains("/month");

    match (has_free, has_paid) {
        (true, true) => Some(PricingType::Freemium),
        (true, false) => Some(PricingType::Free),
        (false, true) => Some(PricingType::Paid),
        (false, false) => None,
    }
}

/// 清理描述HTML
///
/// 剥离围栏与已知前导语；不含标签时转义并包进 `<p>`
pub fn clean_description_html(text: &str) -> String {
    let mut cleaned = text.trim();

    cleaned = cleaned
        .trim_start_matches("```html")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim();

    for preamble in HTML_PREAMBLES {
        if let Some(rest) = cleaned.strip_prefix(preamble) {
            cleaned = rest.trim_start();
        }
    }

    if cleaned.contains('<') {
        cleaned.to_string()
    } else {
        format!("<p>{}</p>", html_escape::encode_text(cleaned))
    }
}
