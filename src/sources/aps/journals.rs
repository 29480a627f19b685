//! The fixed table of known APS journals.

use serde::Serialize;

/// An APS journal handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Journal {
    /// Identifier accepted by [`super::ApsSource::new`]
    pub name: &'static str,
    /// Full journal title
    pub title: &'static str,
    /// Path segment used on journals.aps.org
    pub slug: &'static str,
}

/// Every journal an [`super::ApsSource`] can be built for, in listing order
pub static JOURNALS: [Journal; 13] = [
    Journal {
        name: "PRA",
        title: "Physical Review A",
        slug: "pra",
    },
    Journal {
        name: "PRAB",
        title: "Physical Review Accelerators and Beams",
        slug: "prab",
    },
    Journal {
        name: "PRApplied",
        title: "Physical Review Applied",
        slug: "prapplied",
    },
    Journal {
        name: "PRB",
        title: "Physical Review B",
        slug: "prb",
    },
    Journal {
        name: "PRC",
        title: "Physical Review C",
        slug: "prc",
    },
    Journal {
        name: "PRD",
        title: "Physical Review D",
        slug: "prd",
    },
    Journal {
        name: "PRE",
        title: "Physical Review E",
        slug: "pre",
    },
    Journal {
        name: "PRFluids",
        title: "Physical Review Fluids",
        slug: "prfluids",
    },
    Journal {
        name: "PRL",
        title: "Physical Review Letters",
        slug: "prl",
    },
    Journal {
        name: "PRM",
        title: "Reviews of Modern Physics",
        slug: "rmp",
    },
    Journal {
        name: "PRMaterials",
        title: "Physical Review Materials",
        slug: "prmaterials",
    },
    Journal {
        name: "PRPER",
        title: "Physical Review Physics Education Research",
        slug: "prper",
    },
    Journal {
        name: "PRX",
        title: "Physical Review X",
        slug: "prx",
    },
];

/// Resolve a journal identifier (exact, case-sensitive)
pub fn lookup(name: &str) -> Option<&'static Journal> {
    JOURNALS.iter().find(|j| j.name == name)
}

/// All journal identifiers, in listing order
pub fn names() -> impl Iterator<Item = &'static str> {
    JOURNALS.iter().map(|j| j.name)
}
