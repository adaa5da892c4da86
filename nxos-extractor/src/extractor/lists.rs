//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::collections::BTreeSet;

use nxos_utils::ip::AddressFamily;
use nxos_utils::num::next_sequence;

use crate::debug::Debug;
use crate::diagnostics::Site;
use crate::extractor::Extractor;
use crate::model::LineAction;
use crate::model::lists::{
    AsPathAccessList, CommunityList, ExpandedCommunityList, PrefixList,
    PrefixListLine, RegexLine, StandardCommunityList,
    StandardCommunityListLine,
};
use crate::structures::StructureType;
use crate::tree::{PrefixListStmt, Token};
use crate::validate::{self, ValueDomain};

const PREFIX_LIST_SEQ_FIRST: u32 = 5;
const PREFIX_LIST_SEQ_STEP: u32 = 5;
const COMMUNITY_LIST_SEQ_FIRST: u32 = 1;
const COMMUNITY_LIST_SEQ_STEP: u32 = 1;

impl Extractor<'_> {
    // Returns the prefix-list with the given name, creating it if needed.
    fn prefix_list_entry(
        &mut self,
        site: &Site<'_>,
        af: AddressFamily,
        name: &str,
    ) -> &mut PrefixList {
        let kind = match af {
            AddressFamily::Ipv4 => StructureType::IpPrefixList,
            AddressFamily::Ipv6 => StructureType::Ipv6PrefixList,
        };
        self.define(kind, name, site);
        let lists = match af {
            AddressFamily::Ipv4 => &mut self.model.ip_prefix_lists,
            AddressFamily::Ipv6 => &mut self.model.ipv6_prefix_lists,
        };
        lists
            .entry(name.to_owned())
            .or_insert_with(|| PrefixList::new(name.to_owned(), af))
    }

    pub(super) fn ip_prefix_list(
        &mut self,
        site: &Site<'_>,
        stmt: &PrefixListStmt,
    ) {
        let af = stmt.af;
        let Some(name) = validate::parse_in_length(
            &mut self.diagnostics,
            site,
            &stmt.name,
            &validate::PREFIX_LIST_NAME,
        ) else {
            return;
        };
        let last = self.prefix_list_entry(site, af, &name).last_seq();

        let seq = match &stmt.seq {
            Some(seq) => validate::parse_in_range(
                &mut self.diagnostics,
                site,
                seq,
                &validate::PREFIX_LIST_SEQ,
            ),
            None => Some(next_sequence(
                last,
                PREFIX_LIST_SEQ_FIRST,
                PREFIX_LIST_SEQ_STEP,
            )),
        };
        let prefix = validate::parse_prefix_af(
            &mut self.diagnostics,
            site,
            &stmt.prefix,
            af,
            "prefix-list prefix",
        );
        let domain = match af {
            AddressFamily::Ipv4 => &validate::PREFIX_LENGTH_V4,
            AddressFamily::Ipv6 => &validate::PREFIX_LENGTH_V6,
        };
        let eq = self.prefix_length(site, stmt.eq.as_ref(), domain);
        let ge = self.prefix_length(site, stmt.ge.as_ref(), domain);
        let le = self.prefix_length(site, stmt.le.as_ref(), domain);
        let (Some(seq), Some(prefix), Some(eq), Some(ge), Some(le)) =
            (seq, prefix, eq, ge, le)
        else {
            return;
        };

        // Derive the matched prefix-length range.
        let len = prefix.prefix();
        let max = af.max_prefixlen();
        let (lower, upper) = match (eq, ge, le) {
            (Some(eq), _, _) => (eq, eq),
            (None, Some(ge), Some(le)) => (ge, le),
            (None, Some(ge), None) => (ge, max),
            (None, None, Some(le)) => (len, le),
            (None, None, None) => (len, len),
        };
        if !(len <= lower && lower <= upper && upper <= max) {
            self.diagnostics.red_flag(
                site,
                format!(
                    "invalid prefix length range [{}, {}] for prefix {}",
                    lower, upper, prefix
                ),
            );
            return;
        }

        let line = PrefixListLine {
            action: stmt.action,
            prefix,
            masklen_lower: lower,
            masklen_upper: upper,
        };
        self.prefix_list_entry(site, af, &name)
            .lines
            .insert(seq, line);
    }

    // Parses an optional prefix length. The outer `None` means the token is
    // present but invalid.
    fn prefix_length(
        &mut self,
        site: &Site<'_>,
        token: Option<&Token>,
        domain: &ValueDomain,
    ) -> Option<Option<u8>> {
        match token {
            Some(token) => validate::parse_in_range(
                &mut self.diagnostics,
                site,
                token,
                domain,
            )
            .map(Some),
            None => Some(None),
        }
    }

    pub(super) fn ip_prefix_list_description(
        &mut self,
        site: &Site<'_>,
        af: AddressFamily,
        name: &Token,
        text: &Token,
    ) {
        let Some(name) = validate::parse_in_length(
            &mut self.diagnostics,
            site,
            name,
            &validate::PREFIX_LIST_NAME,
        ) else {
            return;
        };
        let Some(text) = validate::parse_in_length(
            &mut self.diagnostics,
            site,
            text,
            &validate::PREFIX_LIST_DESCRIPTION,
        ) else {
            return;
        };
        self.prefix_list_entry(site, af, &name).description = Some(text);
    }

    // Validates a community-list name and makes sure the list exists with
    // the requested kind. Returns `None` when the statement must be dropped.
    fn community_list_entry(
        &mut self,
        site: &Site<'_>,
        name: &Token,
        kind: StructureType,
    ) -> Option<String> {
        let name = validate::parse_in_length(
            &mut self.diagnostics,
            site,
            name,
            &validate::COMMUNITY_LIST_NAME,
        )?;

        match self.model.ip_community_lists.get(&name) {
            Some(list) if list.structure_type() != kind => {
                let existing = list.structure_type();
                Debug::StructureConflict(&name, existing, kind).log();
                self.diagnostics.red_flag(
                    site,
                    format!(
                        "community-list '{}' is already defined as {}",
                        name,
                        existing.description()
                    ),
                );
                return None;
            }
            Some(_) => (),
            None => {
                let list = match kind {
                    StructureType::IpCommunityListExpanded => {
                        CommunityList::Expanded(ExpandedCommunityList {
                            name: name.clone(),
                            lines: Default::default(),
                        })
                    }
                    _ => CommunityList::Standard(StandardCommunityList {
                        name: name.clone(),
                        lines: Default::default(),
                    }),
                };
                self.model.ip_community_lists.insert(name.clone(), list);
            }
        }

        self.define(kind, &name, site);
        Some(name)
    }

    fn list_seq(
        &mut self,
        site: &Site<'_>,
        seq: Option<&Token>,
        last: Option<u32>,
        domain: &ValueDomain,
    ) -> Option<u32> {
        match seq {
            Some(seq) => validate::parse_in_range(
                &mut self.diagnostics,
                site,
                seq,
                domain,
            ),
            None => Some(next_sequence(
                last,
                COMMUNITY_LIST_SEQ_FIRST,
                COMMUNITY_LIST_SEQ_STEP,
            )),
        }
    }

    pub(super) fn ip_community_list_standard(
        &mut self,
        site: &Site<'_>,
        name: &Token,
        seq: Option<&Token>,
        action: LineAction,
        communities: &[Token],
    ) {
        let Some(name) = self.community_list_entry(
            site,
            name,
            StructureType::IpCommunityListStandard,
        ) else {
            return;
        };
        let last = self
            .model
            .ip_community_lists
            .get(&name)
            .and_then(CommunityList::last_seq);
        let Some(seq) =
            self.list_seq(site, seq, last, &validate::COMMUNITY_LIST_SEQ)
        else {
            return;
        };
        let mut parsed = BTreeSet::new();
        for community in communities {
            let Some(community) = validate::parse_community(
                &mut self.diagnostics,
                site,
                community,
            ) else {
                return;
            };
            parsed.insert(community);
        }

        if let Some(CommunityList::Standard(list)) =
            self.model.ip_community_lists.get_mut(&name)
        {
            let line = StandardCommunityListLine {
                action,
                communities: parsed,
            };
            list.lines.insert(seq, line);
        }
    }

    pub(super) fn ip_community_list_expanded(
        &mut self,
        site: &Site<'_>,
        name: &Token,
        seq: Option<&Token>,
        action: LineAction,
        regex: &Token,
    ) {
        let Some(name) = self.community_list_entry(
            site,
            name,
            StructureType::IpCommunityListExpanded,
        ) else {
            return;
        };
        let last = self
            .model
            .ip_community_lists
            .get(&name)
            .and_then(CommunityList::last_seq);
        let Some(seq) =
            self.list_seq(site, seq, last, &validate::COMMUNITY_LIST_SEQ)
        else {
            return;
        };
        let Some(regex) = validate::parse_regex(
            &mut self.diagnostics,
            site,
            regex,
            "community-list",
        ) else {
            return;
        };

        if let Some(CommunityList::Expanded(list)) =
            self.model.ip_community_lists.get_mut(&name)
        {
            list.lines.insert(seq, RegexLine { action, regex });
        }
    }

    pub(super) fn ip_as_path_access_list(
        &mut self,
        site: &Site<'_>,
        name: &Token,
        seq: Option<&Token>,
        action: LineAction,
        regex: &Token,
    ) {
        let Some(name) = validate::parse_in_length(
            &mut self.diagnostics,
            site,
            name,
            &validate::AS_PATH_LIST_NAME,
        ) else {
            return;
        };
        self.define(StructureType::IpAsPathAccessList, &name, site);
        let last = self
            .model
            .ip_as_path_access_lists
            .entry(name.clone())
            .or_insert_with(|| AsPathAccessList::new(name.clone()))
            .last_seq();

        let Some(seq) =
            self.list_seq(site, seq, last, &validate::AS_PATH_LIST_SEQ)
        else {
            return;
        };
        let Some(regex) = validate::parse_regex(
            &mut self.diagnostics,
            site,
            regex,
            "as-path",
        ) else {
            return;
        };

        if let Some(list) = self.model.ip_as_path_access_lists.get_mut(&name) {
            list.lines.insert(seq, RegexLine { action, regex });
        }
    }
}
