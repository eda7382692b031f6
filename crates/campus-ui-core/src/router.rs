use crate::role::{Role, SectionSpec};

/// Ticket for one navigation. Results fetched under an older generation are
/// dropped instead of written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigation {
    pub section: &'static SectionSpec,
    pub generation: u64,
}

#[derive(Debug, Clone)]
pub struct SectionRouter {
    role: Role,
    active: Option<&'static SectionSpec>,
    generation: u64,
}

impl SectionRouter {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            active: None,
            generation: 0,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn active(&self) -> Option<&'static SectionSpec> {
        self.active
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Activates `name` if the role registers it. Unknown names leave the
    /// router untouched.
    pub fn navigate(&mut self, name: &str) -> Option<Navigation> {
        let Some(section) = self.role.section(name) else {
            tracing::debug!(
                role = self.role.as_str(),
                section = name,
                "ignoring navigation to unregistered section"
            );
            return None;
        };
        self.active = Some(section);
        self.generation = self.generation.wrapping_add(1);
        tracing::debug!(
            role = self.role.as_str(),
            section = name,
            generation = self.generation,
            "section activated"
        );
        Some(Navigation {
            section,
            generation: self.generation,
        })
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }
}
