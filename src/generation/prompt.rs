//! 提示词模板
//!
//! 文案、海报与策划三类提示词，全部为纯函数，便于测试。

use crate::catalog::CampaignPlan;

/// 海报的负面提示词
pub const NEGATIVE_PROMPT: &str = "blurry, low quality, distorted text, ugly, amateur";

/// 文案检索品牌语调时使用的查询
pub const TONE_QUERY: &str = "brand tone, voice, and style guidelines";

/// 海报检索品牌色时使用的查询
pub const COLOR_QUERY: &str = "brand colors and visual style";

/// Creative Director 的系统提示词
pub const CREATIVE_DIRECTOR_SYSTEM_PROMPT: &str = "You are Prachar.ai, an autonomous AI Creative Director for Indian students and creators.

Your mission: Plan and execute complete social media campaigns autonomously.

Workflow:
1. ANALYZE the user's campaign goal
2. PLAN a structured campaign with hook, offer, and CTA
3. RETRIEVE brand guidelines from the Knowledge Base
4. GENERATE 3 Hinglish caption variations
5. CREATE a campaign poster
6. VALIDATE outputs and return the complete campaign

Key Principles:
- Generate culturally relevant Hinglish copy for Indian youth
- Use emojis and slang authentically
- Be autonomous - make decisions without asking for user input
- If brand guidelines are missing, use default Indian youth-friendly tone

Cultural Context:
- Target audience: Indian college students and young creators (18-25 years)
- Language: Hinglish (Hindi-English mix) is preferred
- Tone: Energetic, relatable, authentic
- References: Cricket, Bollywood, festivals, tech trends

Answer with one line each for Hook:, Offer: and CTA:.";

pub fn caption_prompt(plan: &CampaignPlan, brand_context: &str) -> String {
    format!(
        "You are Prachar.ai, an expert Indian marketing creative director.

Campaign Plan:
- Hook: {hook}
- Offer: {offer}
- Call-to-Action: {cta}

Brand Guidelines:
{brand_context}

Task: Generate exactly 3 social media captions in Hinglish (Hindi-English mix).

Requirements:
- Mix Hindi and English naturally (40-60% Hindi)
- Use emojis suitable for Indian youth (🔥, 💯, ✨, 🎉)
- Keep each caption under 280 characters
- Make it energetic, culturally relevant, and authentic
- Include the hook, offer, and CTA in each caption
- Use Indian slang where appropriate (e.g., \"ekdum mast\", \"full on\", \"bindaas\")

Output format:
1. [First caption in Hinglish]
2. [Second caption in Hinglish]
3. [Third caption in Hinglish]

Generate the captions now:",
        hook = plan.hook,
        offer = plan.offer,
        cta = plan.cta,
    )
}

/// 海报提示词；品牌色为空时改为通用配色要求
pub fn image_prompt(caption: &str, brand_colors: &[String]) -> String {
    let color_instruction = if brand_colors.is_empty() {
        "Use vibrant, energetic colors".to_string()
    } else {
        format!("Use these brand colors prominently: {}", brand_colors.join(", "))
    };

    format!(
        "Create a vibrant social media poster for Indian youth audience.

Text to include: \"{caption}\"

Visual Requirements:
- {color_instruction}
- Modern, energetic design
- Bold, readable typography
- Subtle Indian cultural elements (patterns, motifs)
- Professional quality suitable for Instagram/Facebook
- Youth-focused aesthetic

Style: Contemporary Indian social media poster"
    )
}

pub fn planning_prompt(goal: &str) -> String {
    format!(
        "Campaign Goal: {goal}

Analyze this goal and create a structured campaign plan with:
1. Hook: An attention-grabbing opening line
2. Offer: The value proposition or key message
3. CTA: A clear call-to-action

Execute the complete campaign plan now."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caption_prompt_carries_plan_and_brand() {
        let plan = CampaignPlan::new("Hook!", "Free pizza", "Register now");
        let prompt = caption_prompt(&plan, "Keep it playful");
        assert!(prompt.contains("- Hook: Hook!"));
        assert!(prompt.contains("- Offer: Free pizza"));
        assert!(prompt.contains("- Call-to-Action: Register now"));
        assert!(prompt.contains("Keep it playful"));
        assert!(prompt.contains("exactly 3"));
    }

    #[test]
    fn image_prompt_color_instruction() {
        let colors = vec!["#FF5733".to_string(), "#3498DB".to_string()];
        let prompt = image_prompt("Robots!", &colors);
        assert!(prompt.contains("Text to include: \"Robots!\""));
        assert!(prompt.contains("Use these brand colors prominently: #FF5733, #3498DB"));

        let plain = image_prompt("Robots!", &[]);
        assert!(plain.contains("Use vibrant, energetic colors"));
    }

    #[test]
    fn planning_prompt_mentions_goal() {
        assert!(planning_prompt("Hype my fest").starts_with("Campaign Goal: Hype my fest"));
    }
}
