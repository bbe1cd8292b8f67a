use crate::endpoints::{
    posts::{CreatePost, DeletePost, GetPost, ModPost, PostAction},
    users::GetMe,
};

#[derive(Default)]
pub struct PostRepository {
    list: String,
}

impl PostRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_list(mut self, list: impl Into<String>) -> Self {
        self.list = list.into();
        self
    }

    pub fn get(&self, slug: impl Into<String>) -> GetPost {
        GetPost::new(self.list.clone(), slug)
    }

    pub fn upsert(&self) -> CreatePost {
        CreatePost::new(self.list.clone())
    }

    pub fn delete(&self, slug: impl Into<String>) -> DeletePost {
        DeletePost::new(self.list.clone(), slug)
    }

    pub fn modify(&self, slug: impl Into<String>, action: PostAction) -> ModPost {
        ModPost::new(self.list.clone(), slug, action)
    }
}

pub struct UserRepository;

impl UserRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn me(&self) -> GetMe {
        GetMe
    }
}
