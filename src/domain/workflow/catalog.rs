//! Built-in workflow catalog
//!
//! Each workflow has four steps. Result keys are unique within a workflow;
//! nothing enforces that, so keep it that way when editing prompts.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::entity::{Enrichment, InputField, StepDefinition, WorkflowDefinition};
use super::error::WorkflowError;

/// One variant per catalog workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowKind {
    ChannelConcept,
    VideoMarketing,
    VideoPlanning,
    ShortsPlanning,
    ShortsScript,
    ContentScoring,
    KeywordStrategy,
    LongContent,
}

impl WorkflowKind {
    /// All workflows in display order
    pub const ALL: [WorkflowKind; 8] = [
        WorkflowKind::ChannelConcept,
        WorkflowKind::VideoMarketing,
        WorkflowKind::VideoPlanning,
        WorkflowKind::ShortsPlanning,
        WorkflowKind::ShortsScript,
        WorkflowKind::ContentScoring,
        WorkflowKind::KeywordStrategy,
        WorkflowKind::LongContent,
    ];

    pub fn definition(self) -> &'static WorkflowDefinition {
        match self {
            Self::ChannelConcept => &CHANNEL_CONCEPT,
            Self::VideoMarketing => &VIDEO_MARKETING,
            Self::VideoPlanning => &VIDEO_PLANNING,
            Self::ShortsPlanning => &SHORTS_PLANNING,
            Self::ShortsScript => &SHORTS_SCRIPT,
            Self::ContentScoring => &CONTENT_SCORING,
            Self::KeywordStrategy => &KEYWORD_STRATEGY,
            Self::LongContent => &LONG_CONTENT,
        }
    }

    pub fn id(self) -> &'static str {
        self.definition().id
    }
}

impl FromStr for WorkflowKind {
    type Err = WorkflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.id() == s)
            .ok_or_else(|| WorkflowError::not_found(s))
    }
}

impl fmt::Display for WorkflowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Look up a workflow definition by identifier
pub fn get(id: &str) -> Result<&'static WorkflowDefinition, WorkflowError> {
    id.parse::<WorkflowKind>().map(WorkflowKind::definition)
}

/// All workflow definitions in display order
pub fn list() -> Vec<&'static WorkflowDefinition> {
    WorkflowKind::ALL.iter().map(|k| k.definition()).collect()
}

static CHANNEL_CONCEPT: WorkflowDefinition = WorkflowDefinition {
    id: "channel_concept",
    name: "Channel Concept Design",
    description: "Design a channel concept from SEO keywords and viewer personas",
    inputs: &[
        InputField::required("product_name", "Product or service name"),
        InputField::required("service_url", "Service URL"),
        InputField::optional("target_audience", "Target audience"),
        InputField::optional("product_description", "Product or service details"),
    ],
    steps: &[
        StepDefinition {
            title: "Product analysis",
            template: r#"#TASK_EXECUTION[TYPE=Channel design support]

Product or service: {product_name}
Details: {product_description}
Target audience: {target_audience}

Service page ({service_url}):
{service_page}

1. Summarize what the service offers, its strengths, pricing and who it is for.
2. List 30 YouTube SEO keywords related to the product, grouped as
   core keywords, problem-solving keywords, how-to keywords,
   comparison keywords and trend keywords."#,
            result_key: "extracted_keywords",
            requires: &["product_name", "service_url"],
            enrichments: &[Enrichment::PageSummary {
                source: "service_url",
                target: "service_page",
            }],
        },
        StepDefinition {
            title: "Keyword analysis",
            template: r#"Product: {product_name}
Details: {product_description}
Target audience: {target_audience}

Keyword candidates:
{extracted_keywords}

Search metrics:
{keyword_metrics}

Select the 30 keywords best suited to YouTube SEO.
Start with the TOP 3 as: keyword - estimated monthly searches - relevance (0-10) - reason.
Then list the supporting keywords (4-30) in the same format."#,
            result_key: "keywords_analysis",
            requires: &["product_name"],
            enrichments: &[Enrichment::ExtractedKeywordMetrics {
                source: "extracted_keywords",
                target: "keyword_metrics",
            }],
        },
        StepDefinition {
            title: "Persona design",
            template: r#"Keyword analysis:
{keywords_analysis}

Product details: {product_description}

For each of the TOP 3 keywords create three viewer personas (nine in total) with
name, age and gender, occupation and lifestyle, problems, goals and YouTube habits.
Then pick the three personas most relevant to the product and explain why."#,
            result_key: "personas_analysis",
            requires: &[],
            enrichments: &[],
        },
        StepDefinition {
            title: "Concept generation",
            template: r#"Selected personas:
{personas_analysis}

Keyword analysis:
{keywords_analysis}

Product details: {product_description}

Generate 30 channel concepts:
- concept name of 13 characters or fewer containing an SEO keyword
- subtitle
- which persona it fits best
- three example videos
- what sets it apart

Finish with a ranked top 5."#,
            result_key: "concepts",
            requires: &[],
            enrichments: &[],
        },
    ],
};

static VIDEO_MARKETING: WorkflowDefinition = WorkflowDefinition {
    id: "video_marketing",
    name: "Thumbnail & Title Creation",
    description: "Generate thumbnail copy and titles from the content of a video",
    inputs: &[
        InputField::required("video_title", "Working title"),
        InputField::required("video_content", "Video content summary"),
        InputField::optional("video_url", "Video URL"),
        InputField::optional("target_keywords", "Target keywords"),
        InputField::optional("channel_concept", "Channel concept"),
        InputField::optional("selected_thumbnail", "Chosen thumbnail copy"),
        InputField::optional("selected_title", "Chosen title"),
    ],
    steps: &[
        StepDefinition {
            title: "Content analysis",
            template: r#"#TASK_EXECUTION[TYPE=Video marketing support]

Working title: {video_title}
Video content: {video_content}
Channel concept: {channel_concept}
Target keywords: {target_keywords}

Identify the points in this video most likely to attract viewers and the
search intent each point answers."#,
            result_key: "content_analysis",
            requires: &["video_title", "video_content"],
            enrichments: &[],
        },
        StepDefinition {
            title: "Persona analysis",
            template: r#"Video content: {video_content}
Content analysis:
{content_analysis}
Target keywords: {target_keywords}

Create three personas likely to watch this video: age, gender and occupation,
interests, problems, what they want from the video, viewing habits and which
thumbnail elements would resonate with them."#,
            result_key: "persona_analysis",
            requires: &[],
            enrichments: &[],
        },
        StepDefinition {
            title: "Thumbnail & title generation",
            template: r#"Video content: {video_content}
Personas:
{persona_analysis}
Target keywords: {target_keywords}

1. Ten thumbnail copy ideas: short, emotional, concrete, at most 15 characters.
2. Ten titles: include SEO keywords, at most 60 characters, aimed at the personas.
3. A recommendation score and reason for each.
4. The three strongest thumbnail/title combinations."#,
            result_key: "thumbnails_titles",
            requires: &[],
            enrichments: &[],
        },
        StepDefinition {
            title: "Optimization",
            template: r#"Chosen thumbnail copy: {selected_thumbnail}
Chosen title: {selected_title}
Video content: {video_content}
Personas:
{persona_analysis}

1. Three refinements each for the thumbnail copy and the title.
2. An A/B test plan with metrics.
3. Description keywords and 20 recommended tags.
4. The best day and time to publish, with reasons."#,
            result_key: "optimization",
            requires: &["selected_thumbnail", "selected_title"],
            enrichments: &[],
        },
    ],
};

static VIDEO_PLANNING: WorkflowDefinition = WorkflowDefinition {
    id: "video_planning",
    name: "Long-form SEO Video Planning",
    description: "Plan long-form videos and titles optimized for YouTube search",
    inputs: &[
        InputField::required("channel_theme", "Channel theme or concept"),
        InputField::required("main_keyword", "Main search keyword"),
        InputField::optional("channel_name", "Channel name"),
        InputField::optional("target_audience", "Target audience"),
    ],
    steps: &[
        StepDefinition {
            title: "Keyword intent",
            template: r#"#TASK_EXECUTION[TYPE=Video planning]

Channel: {channel_name}
Theme: {channel_theme}
Audience: {target_audience}
Main keyword: {main_keyword}

Analyze the search intent behind the main keyword and list the questions a
viewer typing it wants answered."#,
            result_key: "search_intent",
            requires: &["channel_theme", "main_keyword"],
            enrichments: &[],
        },
        StepDefinition {
            title: "Competitive analysis",
            template: r#"Main keyword: {main_keyword}
Search intent:
{search_intent}

Related keyword metrics:
{keyword_metrics}

Describe what the top-ranking videos for these keywords likely cover, where
they are weak and which angles are left open."#,
            result_key: "competitive_analysis",
            requires: &["main_keyword"],
            enrichments: &[Enrichment::KeywordMetrics {
                source: "main_keyword",
                target: "keyword_metrics",
            }],
        },
        StepDefinition {
            title: "Plan generation",
            template: r#"Theme: {channel_theme}
Competitive analysis:
{competitive_analysis}

Generate 30 differentiated long-form video plans. For each give a title with
the keyword, a one-line hook and the chapter outline."#,
            result_key: "video_plans",
            requires: &[],
            enrichments: &[],
        },
        StepDefinition {
            title: "Evaluation",
            template: r#"Video plans:
{video_plans}

Score every plan for SEO strength and viral potential (0-10 each), then give a
detailed structure for the top 10."#,
            result_key: "evaluation",
            requires: &[],
            enrichments: &[],
        },
    ],
};

static SHORTS_PLANNING: WorkflowDefinition = WorkflowDefinition {
    id: "shorts_planning",
    name: "Shorts SEO Planning",
    description: "Generate and rank short-form video ideas from an SEO keyword angle",
    inputs: &[
        InputField::required("shorts_theme", "Shorts theme or genre"),
        InputField::required("target_keywords", "Target keywords"),
        InputField::optional("channel_name", "Channel name"),
    ],
    steps: &[
        StepDefinition {
            title: "Trend analysis",
            template: r#"#TASK_EXECUTION[TYPE=Shorts planning]

Theme: {shorts_theme}
Target keywords: {target_keywords}
Channel: {channel_name}

Describe the current Shorts formats and hooks that perform well for this theme."#,
            result_key: "shorts_trends",
            requires: &["shorts_theme", "target_keywords"],
            enrichments: &[],
        },
        StepDefinition {
            title: "Market analysis",
            template: r#"Trends:
{shorts_trends}

Keyword metrics:
{keyword_metrics}

Identify underserved keyword and format combinations worth targeting."#,
            result_key: "market_analysis",
            requires: &["target_keywords"],
            enrichments: &[Enrichment::KeywordMetrics {
                source: "target_keywords",
                target: "keyword_metrics",
            }],
        },
        StepDefinition {
            title: "Plan generation",
            template: r#"Theme: {shorts_theme}
Market analysis:
{market_analysis}

Generate 50 Shorts ideas that complete within 60 seconds. For each give the
opening hook, the core beat and the payoff."#,
            result_key: "shorts_plans",
            requires: &[],
            enrichments: &[],
        },
        StepDefinition {
            title: "Ranking",
            template: r#"Shorts ideas:
{shorts_plans}

Score each idea for hook strength, completion rate and shareability, rank the
best ideas per category and propose a production order and posting schedule."#,
            result_key: "ranking_evaluation",
            requires: &[],
            enrichments: &[],
        },
    ],
};

static SHORTS_SCRIPT: WorkflowDefinition = WorkflowDefinition {
    id: "shorts_script",
    name: "Shorts Script Writing",
    description: "Write a short-form video script informed by current trends",
    inputs: &[
        InputField::required("video_title", "Video title (30 characters or fewer)"),
        InputField::required("video_concept", "Video concept"),
        InputField::optional("target_keywords", "Target keywords"),
        InputField::optional("target_audience", "Target audience"),
    ],
    steps: &[
        StepDefinition {
            title: "Concept brief",
            template: r#"#TASK_EXECUTION[TYPE=Shorts script]

Title: {video_title}
Concept: {video_concept}
Keywords: {target_keywords}
Audience: {target_audience}

Turn the concept into a one-paragraph brief: promise, audience, tone and the
single takeaway."#,
            result_key: "concept_brief",
            requires: &["video_title", "video_concept"],
            enrichments: &[],
        },
        StepDefinition {
            title: "Research",
            template: r#"Brief:
{concept_brief}
Keywords: {target_keywords}

Collect the facts, trends and examples the script should draw on, and write
five alternative hooks for the first three seconds."#,
            result_key: "trend_research",
            requires: &[],
            enrichments: &[],
        },
        StepDefinition {
            title: "Script generation",
            template: r#"Title: {video_title}
Brief:
{concept_brief}
Research:
{trend_research}

Write the full script in 15-second scenes with narration, on-screen text,
shooting notes and a closing call to action."#,
            result_key: "script",
            requires: &[],
            enrichments: &[],
        },
        StepDefinition {
            title: "Optimization",
            template: r#"Script:
{script}

Tighten the script for retention: sharpen the hook, cut slack, strengthen the
payoff and the call to action. Return the final script and a list of changes."#,
            result_key: "optimized_script",
            requires: &[],
            enrichments: &[],
        },
    ],
};

static CONTENT_SCORING: WorkflowDefinition = WorkflowDefinition {
    id: "content_scoring",
    name: "Content Scoring",
    description: "Score finished content and feed back concrete improvements",
    inputs: &[
        InputField::required("video_title", "Video title"),
        InputField::required("thumbnail_text", "Thumbnail copy"),
        InputField::optional("video_description", "Video description"),
        InputField::optional("target_keywords", "Target keywords"),
        InputField::optional("channel_name", "Channel name"),
    ],
    steps: &[
        StepDefinition {
            title: "Content summary",
            template: r#"#TASK_EXECUTION[TYPE=Content scoring]

Title: {video_title}
Thumbnail: {thumbnail_text}
Description: {video_description}
Keywords: {target_keywords}
Channel: {channel_name}

Summarize what this content promises and to whom."#,
            result_key: "content_summary",
            requires: &["video_title", "thumbnail_text"],
            enrichments: &[],
        },
        StepDefinition {
            title: "Persona analysis",
            template: r#"Content summary:
{content_summary}

Describe three viewer personas this content targets and what each expects."#,
            result_key: "persona_analysis",
            requires: &[],
            enrichments: &[],
        },
        StepDefinition {
            title: "Scoring",
            template: r#"Title: {video_title}
Thumbnail: {thumbnail_text}
Description: {video_description}
Personas:
{persona_analysis}

Score 0-100 with reasons:
1. SEO optimization (keyword placement and density)
2. Predicted click-through rate
3. Predicted retention (expectation versus delivery)
4. Predicted engagement (comments and shares)
5. Overall score"#,
            result_key: "scoring_result",
            requires: &[],
            enrichments: &[],
        },
        StepDefinition {
            title: "Improvement suggestions",
            template: r#"Scores:
{scoring_result}

For every item scoring below 80 give concrete rewrites of the title, thumbnail
copy or description, ordered by expected impact."#,
            result_key: "improvement_suggestions",
            requires: &[],
            enrichments: &[],
        },
    ],
};

static KEYWORD_STRATEGY: WorkflowDefinition = WorkflowDefinition {
    id: "keyword_strategy",
    name: "Keyword Strategy Simulation",
    description: "Analyze and propose a keyword strategy for running a channel",
    inputs: &[
        InputField::required("business_category", "Business category"),
        InputField::required("main_product", "Main product or service"),
        InputField::optional("channel_name", "Channel name"),
        InputField::optional("target_audience", "Target audience"),
        InputField::optional("competitors", "Main competitors (comma separated)"),
    ],
    steps: &[
        StepDefinition {
            title: "Seed keywords",
            template: r#"#TASK_EXECUTION[TYPE=Keyword strategy]

Business: {business_category}
Product: {main_product}
Audience: {target_audience}
Competitors: {competitors}

Propose 10 seed keywords with a one-line rationale each."#,
            result_key: "seed_keywords",
            requires: &["business_category", "main_product"],
            enrichments: &[],
        },
        StepDefinition {
            title: "Keyword collection",
            template: r#"Seed keywords:
{seed_keywords}

Keyword metrics for {main_product}:
{keyword_metrics}

Evaluate each keyword for search volume, competition and revenue potential and
group them into quick wins, core bets and long shots."#,
            result_key: "keyword_analysis",
            requires: &["main_product"],
            enrichments: &[Enrichment::KeywordMetrics {
                source: "main_product",
                target: "keyword_metrics",
            }],
        },
        StepDefinition {
            title: "Strategy simulation",
            template: r#"Keyword analysis:
{keyword_analysis}

Simulate a 3, 6 and 12 month plan: which keywords to target in each phase,
expected views and subscribers, and the content calendar."#,
            result_key: "strategy_simulation",
            requires: &[],
            enrichments: &[],
        },
        StepDefinition {
            title: "Strategy proposal",
            template: r#"Simulation:
{strategy_simulation}

Write the final strategy with KPIs, success criteria and the first ten videos
to produce."#,
            result_key: "final_strategy",
            requires: &[],
            enrichments: &[],
        },
    ],
};

static LONG_CONTENT: WorkflowDefinition = WorkflowDefinition {
    id: "long_content",
    name: "Long-form Script Writing",
    description: "Write long-form video scripts in a chosen style",
    inputs: &[
        InputField::required("video_title", "Video title"),
        InputField::required("script_style", "Script style"),
        InputField::optional("channel_name", "Channel name"),
        InputField::optional("target_audience", "Target audience"),
        InputField::optional("topic_details", "Topic details"),
    ],
    steps: &[
        StepDefinition {
            title: "Outline",
            template: r#"#TASK_EXECUTION[TYPE=Long-form script]

Title: {video_title}
Style: {script_style}
Channel: {channel_name}
Audience: {target_audience}
Topic details: {topic_details}

Design a chapter outline for a 10-30 minute video suited to the audience's
level of knowledge."#,
            result_key: "outline",
            requires: &["video_title", "script_style"],
            enrichments: &[],
        },
        StepDefinition {
            title: "Research",
            template: r#"Outline:
{outline}

Organize the knowledge each chapter needs: facts, examples and sources to cite."#,
            result_key: "research_notes",
            requires: &[],
            enrichments: &[],
        },
        StepDefinition {
            title: "Script generation",
            template: r#"Title: {video_title}
Style: {script_style}
Outline:
{outline}
Research:
{research_notes}

Write the full script chapter by chapter, with visual directions and B-roll
suggestions."#,
            result_key: "script",
            requires: &[],
            enrichments: &[],
        },
        StepDefinition {
            title: "Optimization",
            template: r#"Script:
{script}

Revise for retention: strengthen the opening, add pattern interrupts and
re-hooks every few minutes, and add editing notes. Return the final script."#,
            result_key: "optimized_script",
            requires: &[],
            enrichments: &[],
        },
    ],
};

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_get_known_workflow() {
        let definition = get("channel_concept").unwrap();
        assert_eq!(definition.name, "Channel Concept Design");
        assert_eq!(definition.step_count(), 4);
    }

    #[test]
    fn test_get_unknown_workflow() {
        let err = get("nonexistent_workflow").unwrap_err();
        assert_eq!(err, WorkflowError::NotFound("nonexistent_workflow".to_string()));
    }

    #[test]
    fn test_kind_round_trips_through_id() {
        for kind in WorkflowKind::ALL {
            assert_eq!(kind.id().parse::<WorkflowKind>().unwrap(), kind);
            assert_eq!(kind.to_string(), kind.id());
        }
    }

    #[test]
    fn test_serde_name_matches_id() {
        for kind in WorkflowKind::ALL {
            let json = serde_json::to_value(kind).unwrap();
            assert_eq!(json, kind.id());
        }
    }

    #[test]
    fn test_list_order_and_uniqueness() {
        let ids: Vec<_> = list().iter().map(|d| d.id).collect();
        assert_eq!(ids.len(), 8);
        assert_eq!(ids[0], "channel_concept");
        assert_eq!(ids.iter().collect::<HashSet<_>>().len(), 8);
    }

    #[test]
    fn test_every_workflow_has_four_steps_with_unique_result_keys() {
        for definition in list() {
            assert_eq!(definition.step_count(), 4, "{}", definition.id);

            let keys: HashSet<_> = definition.steps.iter().map(|s| s.result_key).collect();
            assert_eq!(keys.len(), 4, "{}", definition.id);

            for step in definition.steps {
                assert!(
                    definition.input(step.result_key).is_none(),
                    "{} result key {} collides with an input",
                    definition.id,
                    step.result_key
                );
            }
        }
    }

    #[test]
    fn test_step_requirements_reference_declared_inputs() {
        for definition in list() {
            for step in definition.steps {
                for key in step.requires {
                    assert!(
                        definition.input(key).is_some(),
                        "{} step '{}' requires undeclared input {}",
                        definition.id,
                        step.title,
                        key
                    );
                }
            }
        }
    }

    #[test]
    fn test_first_step_requires_all_required_inputs() {
        for definition in list() {
            let first = definition.step(0).unwrap();
            for field in definition.required_inputs() {
                assert!(first.requires.contains(&field.key), "{}", definition.id);
            }
        }
    }

    #[test]
    fn test_placeholders_resolve_to_known_keys() {
        for definition in list() {
            let mut known: HashSet<&str> = definition.inputs.iter().map(|f| f.key).collect();

            for step in definition.steps {
                known.extend(step.enrichments.iter().map(|e| e.target()));

                for name in step.prompt().placeholders() {
                    assert!(
                        known.contains(name.as_str()),
                        "{} step '{}' uses unknown placeholder {}",
                        definition.id,
                        step.title,
                        name
                    );
                }

                known.insert(step.result_key);
            }
        }
    }

    #[test]
    fn test_enrichment_sources_are_available_before_use() {
        for definition in list() {
            let mut known: HashSet<&str> = definition.inputs.iter().map(|f| f.key).collect();

            for step in definition.steps {
                for enrichment in step.enrichments {
                    assert!(
                        known.contains(enrichment.source()),
                        "{} step '{}' enriches from unknown key {}",
                        definition.id,
                        step.title,
                        enrichment.source()
                    );
                }
                known.insert(step.result_key);
            }
        }
    }

    #[test]
    fn test_channel_keyword_step_seeds_from_extracted_keywords() {
        let step = get("channel_concept").unwrap().step(1).unwrap();
        assert_eq!(
            step.enrichments,
            &[Enrichment::ExtractedKeywordMetrics {
                source: "extracted_keywords",
                target: "keyword_metrics",
            }]
        );
    }
}
