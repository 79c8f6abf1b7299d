//! Spanish prompt templates for categorization and evaluation

use lexqa_domain::{Category, QuestionRecord};

/// Classification prompt listing the taxonomy in canonical order
pub fn categorization_prompt(question: &str) -> String {
    let labels: Vec<&str> = Category::ALL.iter().map(Category::label).collect();
    format!(
        "Dada la siguiente pregunta, asígnala a una de estas categorías:\n\
         {}\n\
         \n\
         Pregunta: {}\n\
         \n\
         Devuelve únicamente el nombre de la categoría, nada más.",
        labels.join(", "),
        question
    )
}

/// Multiple-choice prompt with a worked example
///
/// With `context`, the retrieved passages are joined with newlines under a
/// `Contexto:` heading ahead of the question. Options with empty text are
/// left out.
pub fn evaluation_prompt(question: &QuestionRecord, context: Option<&[String]>) -> String {
    let mut prompt = String::from(INSTRUCTIONS);
    prompt.push_str("\n\nEjemplo:\n");

    if let Some(passages) = context {
        prompt.push_str("Contexto:\nEl contexto irá aquí.\n\n");
        prompt.push_str(WORKED_EXAMPLE);
        prompt.push_str("\n\n\nContexto:\n");
        prompt.push_str(&passages.join("\n"));
        prompt.push_str("\n\n");
    } else {
        prompt.push_str(WORKED_EXAMPLE);
        prompt.push_str("\n\n\n");
    }

    prompt.push_str("Pregunta: ");
    prompt.push_str(&question.question);
    prompt.push_str("\n\nOpciones:\n");
    for (choice, text) in question.present_options() {
        prompt.push_str(&format!("{}) {}\n", choice, text));
    }
    prompt
}

const INSTRUCTIONS: &str = "Responda la siguiente pregunta de opción múltiple. Primero proporcione su razonamiento, luego escriba la respuesta final (a, b, c o d).
Proporcione su razonamiento y respuesta en el siguiente formato:
Razonamiento: [su razonamiento aquí]
Respuesta: [a, b, c o d]";

const WORKED_EXAMPLE: &str = "Pregunta: Según la Constitución Española, ¿cuál de las siguientes afirmaciones es correcta respecto a la jerarquía de las fuentes del Derecho?

Opciones:
a) La Constitución establece que las leyes orgánicas tienen mayor jerarquía que las leyes ordinarias.
b) La Constitución no menciona explícitamente la jerarquía entre las leyes orgánicas y las leyes ordinarias.
c) La Constitución determina que las leyes ordinarias pueden modificar las leyes orgánicas en ciertos casos.
d) La Constitución especifica que las leyes orgánicas y las leyes ordinarias tienen la misma jerarquía

Razonamiento: La Constitución Española establece explícitamente que las leyes orgánicas tienen una jerarquía superior a las leyes ordinarias, ya que regulan materias de especial importancia y requieren un procedimiento de aprobación más riguroso.
Respuesta: a";

#[cfg(test)]
mod tests {
    use super::*;
    use lexqa_domain::Choice;
    use std::collections::BTreeMap;

    fn question() -> QuestionRecord {
        let mut options = BTreeMap::new();
        options.insert(Choice::A, "Sí".to_string());
        options.insert(Choice::B, "No".to_string());
        options.insert(Choice::C, "".to_string());
        options.insert(Choice::D, "Depende".to_string());
        QuestionRecord::new(4, "¿Es el Rey inviolable?", options)
    }

    #[test]
    fn test_categorization_prompt_lists_taxonomy() {
        let prompt = categorization_prompt("¿Qué es la usucapión?");
        assert!(prompt.contains("Constitucional, Administrativo, Civil"));
        assert!(prompt.contains("Teoría del Derecho y Filosofía del Derecho, Otros"));
        assert!(prompt.contains("Pregunta: ¿Qué es la usucapión?"));
    }

    #[test]
    fn test_evaluation_prompt_skips_empty_options() {
        let prompt = evaluation_prompt(&question(), None);
        assert!(prompt.ends_with("Pregunta: ¿Es el Rey inviolable?\n\nOpciones:\na) Sí\nb) No\nd) Depende\n"));
        assert!(!prompt.contains("c) \n"));
        assert!(prompt.contains("Respuesta: a"));
        assert!(!prompt.contains("Contexto:"));
    }

    #[test]
    fn test_evaluation_prompt_with_context() {
        let context = vec!["Artículo 56.".to_string(), "Artículo 64.".to_string()];
        let prompt = evaluation_prompt(&question(), Some(context.as_slice()));
        assert!(prompt.contains("Contexto:\nArtículo 56.\nArtículo 64.\n\nPregunta: ¿Es el Rey"));
    }
}
