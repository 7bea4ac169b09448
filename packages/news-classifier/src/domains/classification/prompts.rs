//! Fixed prompts sent with every classification request.

/// Closed category vocabulary the model is told to pick from.
pub const CATEGORIES: [&str; 13] = [
    "travel",
    "motivation",
    "religion",
    "music",
    "tv",
    "health",
    "food",
    "catering",
    "tech",
    "marketing",
    "ai",
    "content",
    "general",
];

const ARTICLE_PLACEHOLDER: &str = "[article]";

const CLASSIFY_PROMPT: &str = "Classify following article:\n\n[article]";

const CLASSIFY_SYSTEM_MESSAGE: &str = r#"
You are AI parser who parses content to classify it. You always respond with JSON. Your aim is to make summary for the article which is 4-5 sentences long, 4 tags for the article as a list and countries if any mentioned (if cities mentioned and you know the countries then add countries of the city). Also select if any categories can apply to this article from this limited list:

{{CATEGORIES}}

select up to 3, use only this categories.

Here is an example of your response:

{
  "summary": "The article delves into the booming market for plant-based food alternatives in Berlin, Germany. It discusses how technology like 3D printing is innovating meat substitutes, the health benefits of shifting to a plant-based diet, and why Berlin has become the hub for this growing industry. Local startups are attracting global investment, positioning Berlin as a leading city in sustainable food technology.",
  "tags": ["Health", "Tech", "Food", "Sustainability"],
  "countries": ["Germany"],
  "categories": ["Health", "Tech", "Food"]
}

and one more example:

{
  "summary": "The article explores the impact of Japanese minimalist design on contemporary marketing strategies. It highlights how the principle of 'Ma' (the space in between) can be leveraged in advertising for stronger emotional impact. Case studies from renowned brands like Apple and Uniqlo are dissected to demonstrate this influence. The article argues that adopting minimalist design leads to clearer messaging and greater consumer engagement.",
  "tags": ["Marketing", "Design", "Culture", "Consumer Engagement"],
  "countries": ["Japan", "United States"],
  "categories": ["Marketing", "Content"]
}
"#;

/// System message with the category list spliced in.
pub fn build_system_message(categories: &[String]) -> String {
    CLASSIFY_SYSTEM_MESSAGE.replace("{{CATEGORIES}}", &categories.join(", "))
}

/// User prompt for one article.
pub fn build_prompt(content: &str) -> String {
    CLASSIFY_PROMPT.replace(ARTICLE_PLACEHOLDER, content)
}
