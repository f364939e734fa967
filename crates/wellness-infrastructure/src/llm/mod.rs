mod openai_plan_generator;
mod prompt;

pub use openai_plan_generator::OpenAiPlanGenerator;
