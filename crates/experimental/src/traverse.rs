//! Module for rates of one deposit across several locations

// internal modules
use crate::error::{Error, Result};
use crate::normalized::NormalizedFissionFragmentSpectrum;

// fctools modules
use fctools_detector::ReactionRate;
use fctools_quantity::Quantity;
use fctools_utils::f;

// external crates
use log::trace;

/// One point of a [Traverse]
///
/// A bare [ReactionRate] is valued by its mean count rate. Pairing it with
/// the power monitor recorded alongside, as `(&rate, &monitor)`, values the
/// point by its plateau counts per unit monitor signal instead.
#[derive(Debug, Clone, PartialEq)]
pub enum TraverseMember<'a> {
    /// Count rate of a detector, valued by its mean rate
    Rate(&'a ReactionRate),
    /// Plateau counts of a detector per unit power
    PerUnitPower {
        /// Detector at the traverse point
        rate: &'a ReactionRate,
        /// Power monitor recorded alongside
        monitor: &'a ReactionRate,
    },
    /// Fission rate per unit mass and power
    Normalized(NormalizedFissionFragmentSpectrum<'a>),
}

impl TraverseMember<'_> {
    /// Value of the point
    pub fn value(&self) -> Result<Quantity> {
        match self {
            Self::Rate(rr) => Ok(rr.rate()?),
            Self::PerUnitPower { rate, monitor } => Ok(rate.per_unit_power(monitor)?),
            Self::Normalized(nffs) => nffs.value(),
        }
    }

    /// Deposit measured at the point
    pub fn deposit_id(&self) -> Result<&str> {
        match self {
            Self::Rate(rr) | Self::PerUnitPower { rate: rr, .. } => Ok(rr.deposit_id()?),
            Self::Normalized(nffs) => Ok(nffs.deposit_id()),
        }
    }
}

impl<'a> From<&'a ReactionRate> for TraverseMember<'a> {
    fn from(rate: &'a ReactionRate) -> Self {
        Self::Rate(rate)
    }
}

impl<'a> From<(&'a ReactionRate, &'a ReactionRate)> for TraverseMember<'a> {
    fn from((rate, monitor): (&'a ReactionRate, &'a ReactionRate)) -> Self {
        Self::PerUnitPower { rate, monitor }
    }
}

impl<'a> From<NormalizedFissionFragmentSpectrum<'a>> for TraverseMember<'a> {
    fn from(nffs: NormalizedFissionFragmentSpectrum<'a>) -> Self {
        Self::Normalized(nffs)
    }
}

/// Rates of a single deposit measured at several locations
///
/// Locations are unique labels and keep the order they were given in.
#[derive(Debug, Clone, PartialEq)]
pub struct Traverse<'a> {
    members: Vec<(String, TraverseMember<'a>)>,
}

impl<'a> Traverse<'a> {
    /// Collect the points of a traverse
    ///
    /// Fails on an empty traverse, or on a blank or repeated location.
    pub fn new<L, M>(members: impl IntoIterator<Item = (L, M)>) -> Result<Self>
    where
        L: Into<String>,
        M: Into<TraverseMember<'a>>,
    {
        let mut collected: Vec<(String, TraverseMember<'a>)> = Vec::new();

        for (location, member) in members {
            let location = location.into();
            if location.trim().is_empty() {
                return Err(Error::Validation(f!("traverse locations must not be blank")));
            }
            if collected.iter().any(|(l, _)| *l == location) {
                return Err(Error::Validation(f!(
                    "traverse location '{location}' is repeated"
                )));
            }
            collected.push((location, member.into()));
        }

        if collected.is_empty() {
            return Err(Error::Validation(f!("a traverse needs at least one location")));
        }

        Ok(Self { members: collected })
    }

    /// Point at a location
    pub fn get(&self, location: &str) -> Option<&TraverseMember<'a>> {
        self.members
            .iter()
            .find(|(l, _)| l == location)
            .map(|(_, m)| m)
    }

    /// Locations in order
    pub fn locations(&self) -> Vec<&str> {
        self.members.iter().map(|(l, _)| l.as_str()).collect()
    }

    /// Number of locations
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always false, a traverse has at least one location
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Value at every location, in order
    pub fn values(&self) -> Result<Vec<(String, Quantity)>> {
        self.members
            .iter()
            .map(|(location, member)| {
                let value = member.value()?;
                trace!("Traverse point {location}: {value}");
                Ok((location.clone(), value))
            })
            .collect()
    }

    /// The deposit shared by every point
    ///
    /// Returned as a list for symmetry with the other experimental types,
    /// always with a single entry.
    pub fn deposit_ids(&self) -> Result<Vec<String>> {
        let mut deposits = self.members.iter().map(|(_, m)| m.deposit_id());

        let first = deposits
            .next()
            .ok_or_else(|| Error::Validation(f!("a traverse needs at least one location")))??;

        for deposit in deposits {
            let deposit = deposit?;
            if deposit != first {
                return Err(Error::MismatchedIdentity(f!(
                    "traverse mixes deposits {first} and {deposit}"
                )));
            }
        }

        Ok(vec![first.to_string()])
    }

    /// Every point relative to the point at `location`
    pub fn normalised_to(&self, location: &str) -> Result<Vec<(String, Quantity)>> {
        let reference = self
            .get(location)
            .ok_or_else(|| Error::KeyNotFound(f!("traverse location '{location}'")))?
            .value()?;

        self.values()?
            .into_iter()
            .map(|(l, v)| Ok((l, v.divide(reference)?)))
            .collect()
    }
}
