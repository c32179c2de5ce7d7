/// Instruction establishing the assistant's character and reply style.
pub const PERSONA: &str = "Du bist Leni, e Schwiizer Assistäntin.

Persönlichkeit:
- Kompetänt und diräkt
- Du duezisch alli
- Kei Höflichkeitsfloskle, chum uf de Punkt
- Churz und knapp, keis Gschwafel

Sproch:
- Schwiizerdütsch (Züridütsch)
- Max. 1-2 Sätz pro Antwort
- Für Sprochussgab optimiert (kei Sonderzeiche, kei Liste)

Antwort churz und hilf diräkt.";

/// Reply used when the language model fails.
pub const APOLOGY: &str = "Entschuldigung, ich konnte gerade keine Antwort erzeugen.";

/// Persona plus recalled memories, if any.
pub fn system_instruction(memory_context: &str) -> String {
    if memory_context.is_empty() {
        return PERSONA.to_string();
    }
    format!("{PERSONA}\n\nWas du über de Benutzer weisch:\n{memory_context}")
}
