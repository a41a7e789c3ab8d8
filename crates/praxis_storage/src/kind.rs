//! Entity kinds, owned collections, and change channels.

use std::fmt;

/// The kinds of entity the simulation distinguishes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    /// A solid object with matter, spaces, parts and covers.
    TangibleObject,
    /// A physical object without matter (light, sound).
    IntangibleObject,
    /// A space inside a physical object that holds items and matter.
    Space,
    /// Pure matter.
    Substance,
    /// Chemically combined substances.
    Compound,
    /// Physically mixed substances.
    Mixture,
    /// A non-physical entity (a fact, an idea, an organization).
    AbstractEntity,
}

impl EntityKind {
    /// Tangible or intangible object.
    #[must_use]
    pub const fn is_physical_object(self) -> bool {
        matches!(self, Self::TangibleObject | Self::IntangibleObject)
    }

    /// Tangible object.
    #[must_use]
    pub const fn is_tangible(self) -> bool {
        matches!(self, Self::TangibleObject)
    }

    /// Space.
    #[must_use]
    pub const fn is_space(self) -> bool {
        matches!(self, Self::Space)
    }

    /// Substance, compound or mixture.
    #[must_use]
    pub const fn is_matter(self) -> bool {
        matches!(self, Self::Substance | Self::Compound | Self::Mixture)
    }

    /// Compound or mixture.
    #[must_use]
    pub const fn is_composite(self) -> bool {
        matches!(self, Self::Compound | Self::Mixture)
    }

    /// Abstract entity.
    #[must_use]
    pub const fn is_abstract(self) -> bool {
        matches!(self, Self::AbstractEntity)
    }

    /// Has a position: physical objects and spaces.
    #[must_use]
    pub const fn is_spatial(self) -> bool {
        self.is_physical_object() || self.is_space()
    }

    /// Lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::TangibleObject => "tangible object",
            Self::IntangibleObject => "intangible object",
            Self::Space => "space",
            Self::Substance => "substance",
            Self::Compound => "compound",
            Self::Mixture => "mixture",
            Self::AbstractEntity => "abstract entity",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A named collection an entity owns.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Relation {
    /// Physical objects connected to a physical object.
    Connections,
    /// Covers over a physical object.
    Covers,
    /// Parts of a physical object.
    Parts,
    /// Layers applied to a physical object.
    Layers,
    /// Matter a tangible object is made of.
    Matter,
    /// Spaces inside a physical object.
    Spaces,
    /// Physical objects inside a space.
    SpaceItems,
    /// Matter inside a space.
    SpaceMatter,
    /// Substances of a compound or mixture.
    Substances,
    /// Abstract entities attached to any entity.
    AbstractEntities,
}

impl Relation {
    /// All relations, in declaration order.
    pub const ALL: [Self; 10] = [
        Self::Connections,
        Self::Covers,
        Self::Parts,
        Self::Layers,
        Self::Matter,
        Self::Spaces,
        Self::SpaceItems,
        Self::SpaceMatter,
        Self::Substances,
        Self::AbstractEntities,
    ];

    /// The inverse lookup a member gains when attached, if any.
    #[must_use]
    pub const fn owner_kind(self) -> Option<OwnerKind> {
        match self {
            Self::SpaceItems => Some(OwnerKind::SpaceOfItem),
            Self::Parts => Some(OwnerKind::WholeOfPart),
            Self::Spaces => Some(OwnerKind::PhysicalObjectOfSpace),
            Self::Substances => Some(OwnerKind::CompositeOfSubstance),
            Self::Covers => Some(OwnerKind::CoveredObjectOfCover),
            Self::Layers => Some(OwnerKind::ApplicantOfLayer),
            Self::Matter => Some(OwnerKind::TangibleObjectOfMatter),
            Self::SpaceMatter => Some(OwnerKind::SpaceOfMatter),
            Self::Connections | Self::AbstractEntities => None,
        }
    }

    /// The change channel attach/detach events are logged on, if any.
    #[must_use]
    pub const fn channel(self) -> Option<ChangeChannel> {
        match self {
            Self::Connections => Some(ChangeChannel::Connections),
            Self::Covers => Some(ChangeChannel::Covers),
            Self::Parts => Some(ChangeChannel::Parts),
            Self::Layers => Some(ChangeChannel::Layers),
            Self::Matter => Some(ChangeChannel::Matter),
            Self::SpaceItems => Some(ChangeChannel::SpaceItems),
            Self::SpaceMatter => Some(ChangeChannel::TangibleMatter),
            Self::Substances => Some(ChangeChannel::Elements),
            Self::AbstractEntities => Some(ChangeChannel::AbstractEntities),
            Self::Spaces => None,
        }
    }

    /// Returns true if an `owner` of this kind may hold a `member` of that kind.
    #[must_use]
    pub const fn accepts(self, owner: EntityKind, member: EntityKind) -> bool {
        match self {
            Self::Connections | Self::Covers | Self::Parts | Self::Layers => {
                owner.is_physical_object() && member.is_physical_object()
            }
            Self::Matter => owner.is_tangible() && member.is_matter(),
            Self::Spaces => owner.is_physical_object() && member.is_space(),
            Self::SpaceItems => owner.is_space() && member.is_physical_object(),
            Self::SpaceMatter => owner.is_space() && member.is_matter(),
            Self::Substances => owner.is_composite() && member.is_matter(),
            Self::AbstractEntities => member.is_abstract(),
        }
    }
}

/// A single-step inverse lookup from a member to its owner.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[allow(missing_docs)]
pub enum OwnerKind {
    SpaceOfItem,
    WholeOfPart,
    PhysicalObjectOfSpace,
    CompositeOfSubstance,
    CoveredObjectOfCover,
    ApplicantOfLayer,
    TangibleObjectOfMatter,
    SpaceOfMatter,
}

/// A kind of change recorded since the previous step.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[allow(missing_docs)]
pub enum ChangeChannel {
    AbstractEntities,
    Connections,
    Covers,
    Elements,
    Layers,
    Matter,
    Parts,
    Relationships,
    SpaceItems,
    TangibleMatter,
}
