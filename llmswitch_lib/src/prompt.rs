use std::fmt::Display;
use crate::error::Error;

const QUESTION_SLOT: &str = "{question}";

/// Prompt templates with a single question slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromptTemplate {
    /// `Please answer the following question: {question}`
    #[default]
    Instruction,
    /// `Question: {question}\n\nAnswer:`
    QuestionAnswer,
}

impl PromptTemplate {

    /// Template text.
    pub fn pattern(self) -> &'static str {
        match self {
            PromptTemplate::Instruction => "Please answer the following question: {question}",
            PromptTemplate::QuestionAnswer => "Question: {question}\n\nAnswer:",
        }
    }

    /// Substitute the question verbatim.
    pub fn render(self, question: &str) -> Result<String, Error> {
        if question.is_empty() {
            return Err(Error::EmptyQuestion);
        }

        let (head, tail) = self.pattern()
            .split_once(QUESTION_SLOT)
            .unwrap_or((self.pattern(), ""));

        let mut prompt = String::with_capacity(head.len() + question.len() + tail.len());
        prompt.push_str(head);
        prompt.push_str(question);
        prompt.push_str(tail);
        Ok(prompt)
    }
}

impl TryFrom<&str> for PromptTemplate {
    type Error = Error;

    fn try_from(val: &str) -> Result<Self, Self::Error> {
        match val {
            "instruction" => Ok(PromptTemplate::Instruction),
            "qa" => Ok(PromptTemplate::QuestionAnswer),
            _ => Err(Error::InvalidParameter(format!("unknown prompt template: {val}"))),
        }
    }
}

impl Display for PromptTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PromptTemplate::Instruction => f.write_str("instruction"),
            PromptTemplate::QuestionAnswer => f.write_str("qa"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render() {
        assert_eq!(
            PromptTemplate::Instruction.render("What is an LLM?").unwrap(),
            "Please answer the following question: What is an LLM?"
        );
        assert_eq!(
            PromptTemplate::QuestionAnswer.render("What is an LLM?").unwrap(),
            "Question: What is an LLM?\n\nAnswer:"
        );
    }

    #[test]
    fn test_render_braces_and_newlines() {
        let question = "What does {question} mean in\n`fn f() { {} }`?\n{0} {}";
        assert_eq!(
            PromptTemplate::Instruction.render(question).unwrap(),
            format!("Please answer the following question: {question}")
        );
        assert_eq!(
            PromptTemplate::QuestionAnswer.render(question).unwrap(),
            format!("Question: {question}\n\nAnswer:")
        );
    }

    #[test]
    fn test_render_verbatim() {
        assert_eq!(PromptTemplate::QuestionAnswer.render("  x  ").unwrap(), "Question:   x  \n\nAnswer:");
        assert_eq!(PromptTemplate::Instruction.render(" ").unwrap(), "Please answer the following question:  ");
    }

    #[test]
    fn test_empty_question() {
        assert!(matches!(PromptTemplate::Instruction.render(""), Err(Error::EmptyQuestion)));
        assert!(matches!(PromptTemplate::QuestionAnswer.render(""), Err(Error::EmptyQuestion)));
    }

    #[test]
    fn test_names() {
        assert_eq!(PromptTemplate::try_from("qa").unwrap(), PromptTemplate::QuestionAnswer);
        assert_eq!(PromptTemplate::try_from("instruction").unwrap(), PromptTemplate::Instruction);
        assert!(PromptTemplate::try_from("chat").is_err());
        assert_eq!(PromptTemplate::default(), PromptTemplate::Instruction);
        assert_eq!(PromptTemplate::QuestionAnswer.to_string(), "qa");
    }
}
