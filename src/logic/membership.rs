use http::Method;

use crate::{
    cloud::CloudClient,
    dto::{id::ResourceId, membership::MembershipPage},
    http::{Error, Result, ResultExt},
};

pub const MEMBERSHIPS_PAGE_SIZE: u32 = 200;

pub trait MembershipsHandler {
    fn find_membership_id(
        &self,
        group_id: &ResourceId,
        user_id: &ResourceId,
    ) -> impl std::future::Future<Output = Result<String, Error>> + Send;
}

#[derive(Clone)]
pub struct Handler {
    cloud: CloudClient,
    max_pages: u32,
}

impl Handler {
    pub fn new(cloud: CloudClient, max_pages: u32) -> Self {
        Self { cloud, max_pages }
    }

    async fn fetch_page(&self, group_id: &str, page_token: Option<&str>) -> Result<MembershipPage> {
        let mut url = self.cloud.endpoint(["groups", group_id, "memberships"]);
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("maxPageSize", &MEMBERSHIPS_PAGE_SIZE.to_string());
            if let Some(token) = page_token {
                query.append_pair("pageToken", token);
            }
        }

        let payload = self.cloud.call(Method::GET, url, None).await?;
        serde_json::from_value(payload).or_malformed("unrecognized memberships page")
    }
}

impl MembershipsHandler for Handler {
    // Walks the membership pages of `group_id` until `user_id` shows up or the
    // upstream stops handing out continuation tokens.
    async fn find_membership_id(
        &self,
        group_id: &ResourceId,
        user_id: &ResourceId,
    ) -> Result<String, Error> {
        let group = group_id.to_string();
        let wanted = user_id.to_string();
        let mut page_token: Option<String> = None;

        for page_number in 1..=self.max_pages {
            let page = self.fetch_page(&group, page_token.as_deref()).await?;
            log::debug!(
                "[find_membership_id] group {group} page {page_number}: {} memberships",
                page.memberships().len()
            );

            if let Some(membership) = page.memberships().iter().find(|m| m.user_id() == wanted) {
                return membership
                    .membership_id()
                    .map(str::to_owned)
                    .ok_or_else(|| {
                        Error::MalformedResponse(format!(
                            "membership path {:?} has no membership id",
                            membership.path
                        ))
                    });
            }

            match page.next_page_token() {
                Some(token) => page_token = Some(token.to_owned()),
                None => {
                    return Err(Error::NotAMember {
                        user_id: wanted,
                        group_id: group,
                    })
                }
            }
        }

        log::warn!(
            "[find_membership_id] group {group} still paginating after {} pages",
            self.max_pages
        );
        Err(Error::PaginationLimit {
            group_id: group,
            pages: self.max_pages,
        })
    }
}
