//! Derives undirected render links from the directed stargate records.
//!
//! Stargates come in pairs (one per direction) and some systems are joined
//! by several gates, so links are keyed by the id pair ordered smallest
//! first. Link order in the output follows that key.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::model::{ConstellationId, SolarSystem, Stargate, SystemId};

/// What kind of boundary a link crosses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkType {
    /// Both systems are in the same constellation
    Regular,
    /// Same region, different constellations
    Constellation,
    /// Different regions
    Regional,
}

impl LinkType {
    /// Classify a pair of systems. Region mismatch takes precedence over
    /// constellation mismatch.
    pub fn classify(a: &SolarSystem, b: &SolarSystem) -> Self {
        if a.region_id != b.region_id {
            LinkType::Regional
        } else if a.constellation_id != b.constellation_id {
            LinkType::Constellation
        } else {
            LinkType::Regular
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LinkType::Regular => "regular",
            LinkType::Constellation => "constellation",
            LinkType::Regional => "regional",
        }
    }
}

impl fmt::Display for LinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StargateLink {
    /// Smaller of the two system ids
    pub source_system_id: SystemId,
    pub destination_system_id: SystemId,
    pub link_type: LinkType,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConstellationLink {
    /// Smaller of the two constellation ids
    pub source_constellation_id: ConstellationId,
    pub destination_constellation_id: ConstellationId,
}

fn canonical_pair(a: i64, b: i64) -> (i64, i64) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Collapse stargates into one classified link per pair of systems.
///
/// Gates whose source or destination is not in `systems` are dropped.
pub fn process_stargate_links(
    stargates: &[Stargate],
    systems: &HashMap<SystemId, SolarSystem>,
) -> Vec<StargateLink> {
    let mut links: BTreeMap<(SystemId, SystemId), StargateLink> = BTreeMap::new();

    for gate in stargates {
        let (Some(source), Some(destination)) = (
            systems.get(&gate.source_system_id),
            systems.get(&gate.destination_system_id),
        ) else {
            continue;
        };

        let key = canonical_pair(gate.source_system_id, gate.destination_system_id);
        links.entry(key).or_insert_with(|| StargateLink {
            source_system_id: key.0,
            destination_system_id: key.1,
            link_type: LinkType::classify(source, destination),
        });
    }

    links.into_values().collect()
}

/// Collapse system links into one link per pair of adjacent constellations.
///
/// Links inside a single constellation, and links touching a system without
/// a constellation id, do not produce a constellation link.
pub fn calculate_constellation_links(
    stargate_links: &[StargateLink],
    systems: &HashMap<SystemId, SolarSystem>,
) -> Vec<ConstellationLink> {
    let mut links: BTreeMap<(ConstellationId, ConstellationId), ConstellationLink> =
        BTreeMap::new();

    for link in stargate_links {
        let source = systems
            .get(&link.source_system_id)
            .and_then(|s| s.constellation_id);
        let destination = systems
            .get(&link.destination_system_id)
            .and_then(|s| s.constellation_id);

        let (Some(source), Some(destination)) = (source, destination) else {
            continue;
        };
        if source == destination {
            continue;
        }

        let key = canonical_pair(source, destination);
        links.entry(key).or_insert(ConstellationLink {
            source_constellation_id: key.0,
            destination_constellation_id: key.1,
        });
    }

    links.into_values().collect()
}

/// Number of stargate links of each type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkTypeCounts {
    pub regular: usize,
    pub constellation: usize,
    pub regional: usize,
}

impl LinkTypeCounts {
    pub fn tally(links: &[StargateLink]) -> Self {
        links.iter().fold(Self::default(), |mut counts, link| {
            match link.link_type {
                LinkType::Regular => counts.regular += 1,
                LinkType::Constellation => counts.constellation += 1,
                LinkType::Regional => counts.regional += 1,
            }
            counts
        })
    }

    pub fn total(&self) -> usize {
        self.regular + self.constellation + self.regional
    }
}

/// Index systems by id for link processing
pub fn system_lookup(systems: &[SolarSystem]) -> HashMap<SystemId, SolarSystem> {
    systems.iter().map(|s| (s.id, s.clone())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn system(id: i64, region: Option<i64>, constellation: Option<i64>) -> SolarSystem {
        SolarSystem {
            id,
            region_id: region,
            constellation_id: constellation,
            ..Default::default()
        }
    }

    fn gate(id: i64, from: i64, to: i64) -> Stargate {
        Stargate {
            id,
            source_system_id: from,
            destination_system_id: to,
            destination_stargate_id: None,
        }
    }

    /// Region 1 holds constellations 10 and 11; region 2 holds constellation 20
    fn universe() -> HashMap<SystemId, SolarSystem> {
        system_lookup(&[
            system(100, Some(1), Some(10)),
            system(101, Some(1), Some(10)),
            system(102, Some(1), Some(11)),
            system(200, Some(2), Some(20)),
        ])
    }

    #[test]
    fn test_round_trip_gates_collapse_to_one_link() {
        let gates = vec![gate(1, 101, 100), gate(2, 100, 101)];
        let links = process_stargate_links(&gates, &universe());

        assert_eq!(
            links,
            vec![StargateLink {
                source_system_id: 100,
                destination_system_id: 101,
                link_type: LinkType::Regular,
            }]
        );
    }

    #[test]
    fn test_parallel_gates_collapse_to_one_link() {
        let gates = vec![gate(1, 100, 102), gate(2, 100, 102), gate(3, 102, 100)];
        let links = process_stargate_links(&gates, &universe());
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].source_system_id, 100);
        assert_eq!(links[0].destination_system_id, 102);
    }

    #[test]
    fn test_classification_precedence() {
        let systems = universe();
        let gates = vec![gate(1, 100, 101), gate(2, 101, 102), gate(3, 102, 200)];
        let links = process_stargate_links(&gates, &systems);

        let types: Vec<(i64, i64, LinkType)> = links
            .iter()
            .map(|l| (l.source_system_id, l.destination_system_id, l.link_type))
            .collect();
        assert_eq!(
            types,
            vec![
                (100, 101, LinkType::Regular),
                (101, 102, LinkType::Constellation),
                (102, 200, LinkType::Regional),
            ]
        );
    }

    #[test]
    fn test_region_mismatch_wins_over_shared_constellation() {
        let systems = system_lookup(&[
            system(1, Some(1), Some(10)),
            system(2, Some(2), Some(10)),
        ]);
        let links = process_stargate_links(&[gate(1, 1, 2)], &systems);
        assert_eq!(links[0].link_type, LinkType::Regional);
    }

    #[test]
    fn test_missing_ids_compare_unequal_to_concrete_ids() {
        let systems = system_lookup(&[
            system(1, None, Some(10)),
            system(2, Some(1), Some(10)),
            system(3, None, None),
            system(4, None, None),
            system(5, None, Some(10)),
        ]);
        let gates = vec![gate(1, 1, 2), gate(2, 3, 4), gate(3, 1, 3), gate(4, 1, 5)];
        let links = process_stargate_links(&gates, &systems);

        let by_pair: HashMap<(i64, i64), LinkType> = links
            .iter()
            .map(|l| ((l.source_system_id, l.destination_system_id), l.link_type))
            .collect();
        assert_eq!(by_pair[&(1, 2)], LinkType::Regional);
        assert_eq!(by_pair[&(3, 4)], LinkType::Regular);
        assert_eq!(by_pair[&(1, 3)], LinkType::Constellation);
        assert_eq!(by_pair[&(1, 5)], LinkType::Regular);
    }

    #[test]
    fn test_unresolved_endpoints_are_dropped() {
        let gates = vec![gate(1, 100, 999), gate(2, 999, 100), gate(3, 100, 101)];
        let links = process_stargate_links(&gates, &universe());
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].destination_system_id, 101);
    }

    #[test]
    fn test_links_are_unique_and_canonical() {
        let gates = vec![
            gate(1, 200, 102),
            gate(2, 102, 200),
            gate(3, 102, 101),
            gate(4, 101, 100),
            gate(5, 100, 101),
            gate(6, 101, 102),
        ];
        let links = process_stargate_links(&gates, &universe());

        let pairs: HashSet<(i64, i64)> = links
            .iter()
            .map(|l| (l.source_system_id, l.destination_system_id))
            .collect();
        assert_eq!(pairs.len(), links.len());
        assert!(links.iter().all(|l| l.source_system_id < l.destination_system_id));
        assert_eq!(links.len(), 3);
    }

    #[test]
    fn test_constellation_links() {
        let systems = universe();
        let gates = vec![
            gate(1, 100, 101),
            gate(2, 101, 102),
            gate(3, 102, 100),
            gate(4, 102, 200),
            gate(5, 200, 102),
        ];
        let links = process_stargate_links(&gates, &systems);
        let constellation_links = calculate_constellation_links(&links, &systems);

        assert_eq!(
            constellation_links,
            vec![
                ConstellationLink {
                    source_constellation_id: 10,
                    destination_constellation_id: 11,
                },
                ConstellationLink {
                    source_constellation_id: 11,
                    destination_constellation_id: 20,
                },
            ]
        );
    }

    #[test]
    fn test_constellation_links_skip_missing_and_equal_ids() {
        let systems = system_lookup(&[
            system(1, Some(1), None),
            system(2, Some(1), Some(10)),
            system(3, Some(2), Some(10)),
        ]);
        let stargate_links = vec![
            StargateLink {
                source_system_id: 1,
                destination_system_id: 2,
                link_type: LinkType::Constellation,
            },
            StargateLink {
                source_system_id: 2,
                destination_system_id: 3,
                link_type: LinkType::Regional,
            },
            StargateLink {
                source_system_id: 3,
                destination_system_id: 404,
                link_type: LinkType::Regional,
            },
        ];

        let links = calculate_constellation_links(&stargate_links, &systems);
        assert!(links.is_empty());
    }

    #[test]
    fn test_link_type_strings() {
        assert_eq!(LinkType::Regular.to_string(), "regular");
        assert_eq!(LinkType::Constellation.as_str(), "constellation");
        assert_eq!(LinkType::Regional.as_str(), "regional");
    }

    #[test]
    fn test_tally_by_link_type() {
        let link = |a, b, link_type| StargateLink {
            source_system_id: a,
            destination_system_id: b,
            link_type,
        };
        let counts = LinkTypeCounts::tally(&[
            link(1, 2, LinkType::Regular),
            link(2, 3, LinkType::Regional),
            link(3, 4, LinkType::Regular),
            link(4, 5, LinkType::Constellation),
        ]);

        assert_eq!(
            counts,
            LinkTypeCounts {
                regular: 2,
                constellation: 1,
                regional: 1,
            }
        );
        assert_eq!(counts.total(), 4);
        assert_eq!(LinkTypeCounts::tally(&[]), LinkTypeCounts::default());
    }
}
