// Canned inputs: sample customer feedback and persona presets

pub const SAMPLE_FEEDBACKS: [&str; 3] = [
    "Le tableau de bord est super mais il manque un export PDF. Aussi, la recherche est trop lente quand on a beaucoup de projets. J'adorerais avoir des filtres avancés.",
    "Nous avons besoin d'une intégration Slack pour les notifications. L'équipe perd du temps à checker l'app. Par contre, le nouveau design est top !",
    "Bug critique : les données se perdent quand on rafraîchit la page en plein édition. Plusieurs membres de l'équipe ont remonté ce problème.",
];

/// (value sent to the model, display label)
pub const PERSONAS: [(&str, &str); 4] = [
    ("utilisateur", "Utilisateur"),
    ("admin", "Administrateur"),
    ("chef_projet", "Chef de projet"),
    ("developpeur", "Développeur"),
];

pub const DEFAULT_PERSONA: &str = "utilisateur";

/// Append sample `index` (0-based) to a draft, separated by a blank line
pub fn append_sample(draft: &mut String, index: usize) -> bool {
    let Some(sample) = SAMPLE_FEEDBACKS.get(index) else {
        return false;
    };
    if !draft.is_empty() {
        draft.push_str("\n\n");
    }
    draft.push_str(sample);
    true
}

/// Resolve a persona given either its value or its label, ignoring case.
/// Unknown personas are passed through unchanged.
pub fn resolve_persona(input: &str) -> String {
    PERSONAS
        .iter()
        .find(|(value, label)| {
            value.eq_ignore_ascii_case(input) || label.to_lowercase() == input.to_lowercase()
        })
        .map(|(value, _)| value.to_string())
        .unwrap_or_else(|| input.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_sample() {
        let mut draft = String::new();
        assert!(append_sample(&mut draft, 0));
        assert_eq!(draft, SAMPLE_FEEDBACKS[0]);

        assert!(append_sample(&mut draft, 2));
        assert_eq!(draft, format!("{}\n\n{}", SAMPLE_FEEDBACKS[0], SAMPLE_FEEDBACKS[2]));

        assert!(!append_sample(&mut draft, 3));
    }

    #[test]
    fn test_resolve_persona() {
        assert_eq!(resolve_persona("Chef de projet"), "chef_projet");
        assert_eq!(resolve_persona("ADMIN"), "admin");
        assert_eq!(resolve_persona("développeur"), "developpeur");
        assert_eq!(resolve_persona("product designer"), "product designer");
    }
}
