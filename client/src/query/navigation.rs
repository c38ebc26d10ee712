//! [`Query`] loading the navigation data of the page frame.

use common::operations::{By, Select};
use futures::future;
use tracerr::Traced;

use crate::{
    domain::{Catalogue, Tag, UserInfo},
    infra::api::{self, Api},
    Client,
};

use super::Query;

/// Navigation data the page frame is built from.
///
/// Not part of the gating logic: it loads concurrently with the access
/// gate's resolution and must never block on it.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Navigation {
    /// All [`Tag`]s of the platform.
    pub tags: Vec<Tag>,

    /// All users of the platform.
    pub users: Vec<UserInfo>,

    /// All [`Catalogue`]s of the platform.
    pub catalogues: Vec<Catalogue>,
}

/// [`Query`] loading [`Navigation`] data.
///
/// The three listings are fetched concurrently.
#[derive(Clone, Copy, Debug)]
pub struct LoadNavigation;

impl<A, S> Query<LoadNavigation> for Client<A, S>
where
    A: Api<Select<By<Vec<Tag>, ()>>, Ok = Vec<Tag>, Err = Traced<api::Error>>
        + Api<
            Select<By<Vec<UserInfo>, ()>>,
            Ok = Vec<UserInfo>,
            Err = Traced<api::Error>,
        > + Api<
            Select<By<Vec<Catalogue>, ()>>,
            Ok = Vec<Catalogue>,
            Err = Traced<api::Error>,
        >,
{
    type Ok = Navigation;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        _: LoadNavigation,
    ) -> Result<Self::Ok, Self::Err> {
        let (tags, users, catalogues) = future::try_join3(
            self.api().execute(Select(By::<Vec<Tag>, ()>::new(()))),
            self.api().execute(Select(By::<Vec<UserInfo>, ()>::new(()))),
            self.api()
                .execute(Select(By::<Vec<Catalogue>, ()>::new(()))),
        )
        .await?;

        Ok(Navigation {
            tags,
            users,
            catalogues,
        })
    }
}
