//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use crate::diagnostics::Site;
use crate::extractor::Extractor;
use crate::model::system::{LoggingServer, NtpServer, SnmpHost, TacacsServer};
use crate::structures::UsageKind;
use crate::tree::Token;
use crate::validate;

impl Extractor<'_> {
    pub(super) fn hostname(&mut self, site: &Site<'_>, name: &Token) {
        if let Some(name) = validate::parse_in_length(
            &mut self.diagnostics,
            site,
            name,
            &validate::HOSTNAME,
        ) {
            self.model.hostname = Some(name);
        }
    }

    pub(super) fn feature(&mut self, name: &Token, negated: bool) {
        let name = name.as_str().to_ascii_lowercase();
        if negated {
            self.model.features.remove(&name);
        } else {
            self.model.features.insert(name);
        }
    }

    pub(super) fn ntp_server(
        &mut self,
        site: &Site<'_>,
        host: &Token,
        prefer: bool,
        use_vrf: Option<&Token>,
    ) {
        let use_vrf = use_vrf.and_then(|vrf| {
            self.vrf_reference(site, vrf, UsageKind::NtpServerUseVrf)
        });
        self.model
            .ntp_servers
            .insert(host.text.clone(), NtpServer { prefer, use_vrf });
    }

    pub(super) fn logging_server(
        &mut self,
        site: &Site<'_>,
        host: &Token,
        level: Option<&Token>,
        use_vrf: Option<&Token>,
    ) {
        let severity = level.and_then(|level| {
            validate::parse_in_range(
                &mut self.diagnostics,
                site,
                level,
                &validate::LOGGING_SEVERITY,
            )
        });
        let use_vrf = use_vrf.and_then(|vrf| {
            self.vrf_reference(site, vrf, UsageKind::LoggingServerUseVrf)
        });
        self.model
            .logging_servers
            .insert(host.text.clone(), LoggingServer { severity, use_vrf });
    }

    pub(super) fn tacacs_server_host(
        &mut self,
        site: &Site<'_>,
        host: &Token,
        port: Option<&Token>,
    ) {
        let port = port.and_then(|port| {
            validate::parse_in_range(
                &mut self.diagnostics,
                site,
                port,
                &validate::TACACS_PORT,
            )
        });
        self.model
            .tacacs_servers
            .insert(host.text.clone(), TacacsServer { port });
    }

    pub(super) fn snmp_server_host(
        &mut self,
        host: &Token,
        community: Option<&Token>,
    ) {
        let community = community.map(|community| community.text.clone());
        self.model
            .snmp_hosts
            .insert(host.text.clone(), SnmpHost { community });
    }
}
