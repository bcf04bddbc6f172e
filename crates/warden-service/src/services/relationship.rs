//! Relationship service
//!
//! The proposal/marriage/divorce workflow. One module serves both divorce
//! policies: unilateral (the divorce lands immediately) and mutual consent
//! (the spouse must accept a pending request), selected by configuration.

use chrono::Utc;
use tracing::{info, instrument};

use warden_common::DivorcePolicy;
use warden_core::{DivorceRequest, DomainError, MarriageLink, Proposal, Snowflake};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::notify_member;

/// What a divorce call produced under the active policy
#[derive(Debug, Clone)]
pub enum DivorceOutcome {
    /// Unilateral policy: the marriage is already gone
    Completed { ex_spouse: Snowflake },
    /// Mutual-consent policy: the spouse has to respond
    Pending(DivorceRequest),
}

/// Relationship service
pub struct RelationshipService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RelationshipService<'a> {
    /// Create a new RelationshipService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Open a proposal from `proposer` to `target`
    ///
    /// Any pending proposal involving either party - on either side -
    /// blocks a new one. That guard is deliberately strict: a member who
    /// is merely the target of an unrelated proposal cannot propose
    /// elsewhere until it resolves.
    #[instrument(skip(self))]
    pub async fn propose(
        &self,
        proposer: Snowflake,
        target: Snowflake,
        guild: Snowflake,
    ) -> ServiceResult<Proposal> {
        if proposer == target {
            return Err(DomainError::SelfTarget.into());
        }

        if self.ctx.marriage_store().get(proposer).await?.is_some() {
            return Err(DomainError::AlreadyMarried(proposer).into());
        }
        if self.ctx.marriage_store().get(target).await?.is_some() {
            return Err(DomainError::AlreadyMarried(target).into());
        }

        if self.ctx.proposal_store().any_involving(proposer).await?
            || self.ctx.proposal_store().any_involving(target).await?
        {
            return Err(DomainError::ProposalConflict.into());
        }

        let proposal = Proposal::new(proposer, target, guild, Utc::now());
        self.ctx.proposal_store().put(&proposal).await?;

        info!(id = %proposal.id(), proposer = %proposer, target = %target, "Proposal created");

        notify_member(
            self.ctx.platform(),
            target,
            "Someone proposed to you! Respond with the buttons within 30 minutes.",
        )
        .await;

        Ok(proposal)
    }

    /// The target accepts; both parties must still be single
    #[instrument(skip(self))]
    pub async fn accept_proposal(
        &self,
        actor: Snowflake,
        proposal_id: &str,
    ) -> ServiceResult<Proposal> {
        let proposal = self
            .ctx
            .proposal_store()
            .get(proposal_id)
            .await?
            .ok_or(DomainError::ProposalNotFound)?;

        if actor != proposal.target {
            return Err(DomainError::NotAddressee.into());
        }

        // One side may have married elsewhere while this sat pending; the
        // proposal is discarded rather than consummated.
        if self
            .ctx
            .marriage_store()
            .get(proposal.proposer)
            .await?
            .is_some()
            || self
                .ctx
                .marriage_store()
                .get(proposal.target)
                .await?
                .is_some()
        {
            self.ctx.proposal_store().delete(proposal_id).await?;
            return Err(DomainError::ProposalInvalidated.into());
        }

        self.ctx
            .marriage_store()
            .link_pair(proposal.proposer, proposal.target, Utc::now())
            .await?;
        self.ctx.proposal_store().delete(proposal_id).await?;

        info!(id = %proposal_id, proposer = %proposal.proposer, target = %proposal.target, "Marriage created");

        Ok(proposal)
    }

    /// The target rejects; the record is dropped and nothing else changes
    #[instrument(skip(self))]
    pub async fn reject_proposal(
        &self,
        actor: Snowflake,
        proposal_id: &str,
    ) -> ServiceResult<Proposal> {
        let proposal = self
            .ctx
            .proposal_store()
            .get(proposal_id)
            .await?
            .ok_or(DomainError::ProposalNotFound)?;

        if actor != proposal.target {
            return Err(DomainError::NotAddressee.into());
        }

        self.ctx.proposal_store().delete(proposal_id).await?;

        info!(id = %proposal_id, "Proposal rejected");

        Ok(proposal)
    }

    /// A member's marriage link, if any
    #[instrument(skip(self))]
    pub async fn marriage_status(&self, member: Snowflake) -> ServiceResult<Option<MarriageLink>> {
        Ok(self.ctx.marriage_store().get(member).await?)
    }

    /// File for divorce under the active policy
    #[instrument(skip(self))]
    pub async fn divorce(
        &self,
        applicant: Snowflake,
        guild: Snowflake,
    ) -> ServiceResult<DivorceOutcome> {
        let link = self
            .ctx
            .marriage_store()
            .get(applicant)
            .await?
            .ok_or(DomainError::NotMarried(applicant))?;

        match self.ctx.divorce_policy() {
            DivorcePolicy::Unilateral => {
                self.ctx
                    .marriage_store()
                    .unlink_pair(applicant, link.spouse)
                    .await?;

                info!(applicant = %applicant, spouse = %link.spouse, "Divorce completed");

                notify_member(
                    self.ctx.platform(),
                    link.spouse,
                    "Your spouse filed for divorce. You are both single again.",
                )
                .await;

                Ok(DivorceOutcome::Completed {
                    ex_spouse: link.spouse,
                })
            }
            DivorcePolicy::Mutual => {
                if self.ctx.divorce_store().any_involving(applicant).await?
                    || self.ctx.divorce_store().any_involving(link.spouse).await?
                {
                    return Err(DomainError::DivorceConflict.into());
                }

                let request = DivorceRequest::new(applicant, link.spouse, guild, Utc::now());
                self.ctx.divorce_store().put(&request).await?;

                info!(id = %request.id(), applicant = %applicant, "Divorce request created");

                notify_member(
                    self.ctx.platform(),
                    link.spouse,
                    "Your spouse filed for divorce. Respond with the buttons within 30 minutes.",
                )
                .await;

                Ok(DivorceOutcome::Pending(request))
            }
        }
    }

    /// The spouse consents; the marriage ends
    #[instrument(skip(self))]
    pub async fn accept_divorce(
        &self,
        actor: Snowflake,
        request_id: &str,
    ) -> ServiceResult<DivorceRequest> {
        let request = self
            .ctx
            .divorce_store()
            .get(request_id)
            .await?
            .ok_or(DomainError::DivorceNotFound)?;

        if actor != request.spouse {
            return Err(DomainError::NotAddressee.into());
        }

        self.ctx
            .marriage_store()
            .unlink_pair(request.applicant, request.spouse)
            .await?;
        self.ctx.divorce_store().delete(request_id).await?;

        info!(id = %request_id, "Divorce accepted");

        Ok(request)
    }

    /// The spouse declines; the marriage persists
    #[instrument(skip(self))]
    pub async fn reject_divorce(
        &self,
        actor: Snowflake,
        request_id: &str,
    ) -> ServiceResult<DivorceRequest> {
        let request = self
            .ctx
            .divorce_store()
            .get(request_id)
            .await?
            .ok_or(DomainError::DivorceNotFound)?;

        if actor != request.spouse {
            return Err(DomainError::NotAddressee.into());
        }

        self.ctx.divorce_store().delete(request_id).await?;

        info!(id = %request_id, "Divorce rejected");

        Ok(request)
    }
}
