use crate::common::AuditSubmission;

/// Build the single natural-language prompt sent to the model.
///
/// The section skeleton is part of the product: the email renderer and the
/// report consumers rely on these exact headings coming back in markdown.
pub fn build_audit_prompt(submission: &AuditSubmission, website_content: &str) -> String {
    format!(
        r#"
As an expert business automation consultant, analyze the following business and provide a comprehensive automation audit report:

BUSINESS INFORMATION:
- Name: {name}
- Business Type: {business_type}
- Website: {website}
- Daily Hours on Repetitive Tasks: {time_spent_daily}
- Current Challenges: {current_challenges}

WEBSITE CONTENT ANALYSIS:
{website_content}

Please provide a detailed, personalized report in the following format:

# Business Automation Audit Report for {name}

## Executive Summary
[2-3 sentence overview of automation potential]

## Business Analysis
[Analysis of their business model based on website content and type]

## Top 5 Automation Opportunities

### 1. [Automation Name]
- **What it does:** [Description]
- **Tools needed:** [Specific tools/platforms]
- **Time saved:** [Hours per week]
- **Cost estimate:** [Implementation cost]
- **ROI timeline:** [Payback period]

### 2. [Automation Name]
[Same format for 5 opportunities total]

## Priority Implementation Roadmap
- **Phase 1 (Month 1):** [Quick wins]
- **Phase 2 (Month 2-3):** [Medium complexity]
- **Phase 3 (Month 4-6):** [Advanced automations]

## Projected Annual Savings
- **Time saved:** [Total hours per year]
- **Cost savings:** [Dollar amount]
- **Revenue potential:** [Additional revenue opportunities]

## Next Steps
[Specific actionable recommendations]

Make this report highly specific to their business type, challenges, and website content. Focus on practical, implementable solutions using tools like Make.com, Zapier, AI assistants, and custom workflows.
"#,
        name = submission.name,
        business_type = submission.business_type,
        website = submission.website,
        time_spent_daily = submission.time_spent_daily,
        current_challenges = submission.current_challenges,
        website_content = website_content,
    )
}
