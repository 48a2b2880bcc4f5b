use crate::{
    s3::{
        S3,
        actions::{
            CopyObject, CreateBucket, DeleteBucket, DeleteObject, GetBucketAccelerate, GetObject,
            HeadBucket, HeadObject, PutBucketAccelerate, PutObject,
        },
        limits::MAX_PUT_OBJECT_SIZE_BYTES,
    },
    storage::{ObjectBody, StorageClient, StorageError},
};
use async_trait::async_trait;

#[async_trait]
impl StorageClient for S3 {
    async fn bucket_exists(&self, bucket: &str) -> Result<bool, StorageError> {
        HeadBucket::new(bucket).request(self).await
    }

    async fn create_bucket(&self, bucket: &str, region: Option<&str>) -> Result<(), StorageError> {
        let location = CreateBucket::new(bucket, region).request(self).await?;
        log::debug!("bucket {bucket} created, location: {location:?}");
        Ok(())
    }

    async fn delete_bucket(&self, bucket: &str) -> Result<(), StorageError> {
        DeleteBucket::new(bucket).request(self).await
    }

    async fn object_exists(&self, bucket: &str, key: &str) -> Result<bool, StorageError> {
        HeadObject::new(bucket, key).request(self).await
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: ObjectBody,
        content_type: &str,
    ) -> Result<(), StorageError> {
        let data = body.collect_limited(MAX_PUT_OBJECT_SIZE_BYTES).await?;
        let etag = PutObject::new(bucket, key, content_type)
            .request(self, data)
            .await?;
        log::debug!("object {bucket}/{key} stored, ETag: {etag:?}");
        Ok(())
    }

    async fn get_object(&self, bucket: &str, key: &str) -> Result<ObjectBody, StorageError> {
        GetObject::new(bucket, key).request(self).await
    }

    async fn copy_object(
        &self,
        src_bucket: &str,
        src_key: &str,
        dst_bucket: &str,
        dst_key: &str,
    ) -> Result<(), StorageError> {
        CopyObject::new(src_bucket, src_key, dst_bucket, dst_key)
            .request(self)
            .await
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<(), StorageError> {
        DeleteObject::new(bucket, key).request(self).await
    }

    async fn enable_acceleration(&self, bucket: &str) -> Result<String, StorageError> {
        PutBucketAccelerate::new(bucket, true).request(self).await?;
        let configuration = GetBucketAccelerate::new(bucket).request(self).await?;
        Ok(configuration.status.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::s3::{Credentials, Region};
    use mockito::Matcher;
    use secrecy::SecretString;

    fn s3(endpoint: String) -> S3 {
        S3::new(
            Credentials::new("access", &SecretString::new("secret".into())),
            Region::Custom {
                name: "us-east-1".to_string(),
                endpoint,
            },
        )
    }

    #[tokio::test]
    async fn test_bucket_exists() {
        let mut server = mockito::Server::new_async().await;
        let found = server.mock("HEAD", "/found").with_status(200).create_async().await;
        let forbidden = server
            .mock("HEAD", "/forbidden")
            .with_status(403)
            .create_async()
            .await;
        let missing = server
            .mock("HEAD", "/missing")
            .with_status(404)
            .create_async()
            .await;

        let s3 = s3(server.url());
        assert!(s3.bucket_exists("found").await.unwrap());
        assert!(s3.bucket_exists("forbidden").await.unwrap());
        assert!(!s3.bucket_exists("missing").await.unwrap());

        found.assert_async().await;
        forbidden.assert_async().await;
        missing.assert_async().await;
    }

    #[tokio::test]
    async fn test_object_exists() {
        let mut server = mockito::Server::new_async().await;
        let _found = server
            .mock("HEAD", "/bucket/dir/key.txt")
            .match_header("authorization", Matcher::Regex("^AWS4-HMAC-SHA256 ".to_string()))
            .with_status(200)
            .create_async()
            .await;
        let _missing = server
            .mock("HEAD", "/bucket/missing")
            .with_status(404)
            .create_async()
            .await;
        let _error = server
            .mock("HEAD", "/bucket/error")
            .with_status(500)
            .create_async()
            .await;

        let s3 = s3(server.url());
        assert!(s3.object_exists("bucket", "dir/key.txt").await.unwrap());
        assert!(!s3.object_exists("bucket", "missing").await.unwrap());

        let err = s3.object_exists("bucket", "error").await.unwrap_err();
        assert!(matches!(err, StorageError::Service { status: 500, .. }));
        assert_eq!(err.code(), Some("InternalServerError"));
    }

    #[tokio::test]
    async fn test_create_bucket() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/bucket")
            .match_body(Matcher::Regex(
                "<LocationConstraint>eu-west-1</LocationConstraint>".to_string(),
            ))
            .with_status(200)
            .with_header("location", "/bucket")
            .create_async()
            .await;

        let s3 = s3(server.url());
        s3.create_bucket("bucket", Some("eu-west-1")).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_create_bucket_conflict() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("PUT", "/bucket")
            .with_status(409)
            .with_body(
                r#"<?xml version="1.0" encoding="UTF-8"?>
<Error><Code>BucketAlreadyOwnedByYou</Code><Message>Your previous request to create the named bucket succeeded and you already own it.</Message></Error>"#,
            )
            .create_async()
            .await;

        let s3 = s3(server.url());
        let err = s3.create_bucket("bucket", None).await.unwrap_err();
        assert_eq!(err.code(), Some("BucketAlreadyOwnedByYou"));
    }

    #[tokio::test]
    async fn test_put_object() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/bucket/key")
            .match_header("content-type", "text/plain")
            .match_header("content-md5", "XUFAKrxLKna5cZ2REBfFkg==")
            .match_body("hello")
            .with_status(200)
            .with_header("ETag", "\"5d41402abc4b2a76b9719d911017c592\"")
            .create_async()
            .await;

        let s3 = s3(server.url());
        s3.put_object("bucket", "key", ObjectBody::from_bytes("hello"), "text/plain")
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_object() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/bucket/key")
            .with_status(200)
            .with_body("content")
            .create_async()
            .await;
        let _missing = server
            .mock("GET", "/bucket/missing")
            .with_status(404)
            .with_body("<Error><Code>NoSuchKey</Code><Message>The specified key does not exist.</Message></Error>")
            .create_async()
            .await;

        let s3 = s3(server.url());
        let body = s3.get_object("bucket", "key").await.unwrap();
        assert_eq!(body.collect().await.unwrap(), "content");

        let err = s3.get_object("bucket", "missing").await.unwrap_err();
        assert_eq!(err.code(), Some("NoSuchKey"));
    }

    #[tokio::test]
    async fn test_copy_object() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/dst/copy")
            .match_header("x-amz-copy-source", "src/key")
            .with_status(200)
            .with_body("<CopyObjectResult><ETag>\"etag\"</ETag><LastModified>2024-01-01T00:00:00.000Z</LastModified></CopyObjectResult>")
            .create_async()
            .await;

        let s3 = s3(server.url());
        s3.copy_object("src", "key", "dst", "copy").await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_copy_object_error_in_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("PUT", "/dst/copy")
            .with_status(200)
            .with_body("<Error><Code>InternalError</Code><Message>We encountered an internal error. Please try again.</Message></Error>")
            .create_async()
            .await;

        let s3 = s3(server.url());
        let err = s3.copy_object("src", "key", "dst", "copy").await.unwrap_err();
        assert_eq!(err.code(), Some("InternalError"));
    }

    #[tokio::test]
    async fn test_delete() {
        let mut server = mockito::Server::new_async().await;
        let object = server
            .mock("DELETE", "/bucket/key")
            .with_status(204)
            .create_async()
            .await;
        let bucket = server
            .mock("DELETE", "/bucket")
            .with_status(204)
            .create_async()
            .await;

        let s3 = s3(server.url());
        s3.delete_object("bucket", "key").await.unwrap();
        s3.delete_bucket("bucket").await.unwrap();
        object.assert_async().await;
        bucket.assert_async().await;
    }

    #[tokio::test]
    async fn test_enable_acceleration() {
        let mut server = mockito::Server::new_async().await;
        let put = server
            .mock("PUT", "/bucket")
            .match_query(Matcher::UrlEncoded("accelerate".into(), String::new()))
            .match_body(Matcher::Regex("<Status>Enabled</Status>".to_string()))
            .with_status(200)
            .create_async()
            .await;
        let get = server
            .mock("GET", "/bucket")
            .match_query(Matcher::UrlEncoded("accelerate".into(), String::new()))
            .with_status(200)
            .with_body(r#"<AccelerateConfiguration xmlns="http://s3.amazonaws.com/doc/2006-03-01/"><Status>Enabled</Status></AccelerateConfiguration>"#)
            .create_async()
            .await;

        let s3 = s3(server.url());
        assert_eq!(s3.enable_acceleration("bucket").await.unwrap(), "Enabled");
        put.assert_async().await;
        get.assert_async().await;
    }
}
